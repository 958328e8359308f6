//! Keyword-based spending categories.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Transfer,
    Salary,
    Shopping,
    Food,
    Entertainment,
    Utilities,
    Fuel,
    Others,
}

/// Checked in order; the first keyword found in the clean narration wins.
const KEYWORDS: [(Category, &[&str]); 7] = [
    (
        Category::Transfer,
        &["upi", "imps", "neft", "rtgs", "ib billpay", "billpay"],
    ),
    (Category::Salary, &["salary", "payroll", "credit"]),
    (
        Category::Shopping,
        &["amazon", "flipkart", "myntra", "shopping", "ecommerce", "paytm"],
    ),
    (
        Category::Food,
        &[
            "swiggy",
            "zomato",
            "food",
            "restaurant",
            "cafe",
            "luluinternationalsho",
            "bakery",
            "gpay",
        ],
    ),
    (
        Category::Entertainment,
        &["netflix", "youtube", "spotify", "entertainment"],
    ),
    (
        Category::Utilities,
        &["electricity", "water", "gas", "bill", "recharge"],
    ),
    (Category::Fuel, &["petrol", "diesel", "fuel", "hpcl", "bpcl"]),
];

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Transfer,
        Category::Salary,
        Category::Shopping,
        Category::Food,
        Category::Entertainment,
        Category::Utilities,
        Category::Fuel,
        Category::Others,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Category::Transfer => "transfer",
            Category::Salary => "salary",
            Category::Shopping => "shopping",
            Category::Food => "food",
            Category::Entertainment => "entertainment",
            Category::Utilities => "utilities",
            Category::Fuel => "fuel",
            Category::Others => "others",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim().to_lowercase();
        Self::ALL.into_iter().find(|category| category.title() == value)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Categorize an already-cleaned narration (see `statement::clean_text`).
pub fn categorize(narration_clean: &str) -> Category {
    KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|kw| narration_clean.contains(kw)))
        .map(|(category, _)| *category)
        .unwrap_or(Category::Others)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_matching_category_wins() {
        // "upi" is checked before "swiggy"
        assert_eq!(categorize("upi swiggy order"), Category::Transfer);
        assert_eq!(categorize("swiggy order"), Category::Food);
        assert_eq!(categorize("salary for march"), Category::Salary);
        assert_eq!(categorize("hpcl station 12"), Category::Fuel);
        assert_eq!(categorize("netflix com"), Category::Entertainment);
    }

    #[test]
    fn unmatched_narration_is_others() {
        assert_eq!(categorize("atm wdl 4451"), Category::Others);
        assert_eq!(categorize(""), Category::Others);
    }

    #[test]
    fn substring_matches_inside_words() {
        // "gas" inside "vegas" still matches utilities
        assert_eq!(categorize("vegas trip"), Category::Utilities);
    }

    #[test]
    fn parse_round_trips_titles() {
        for category in Category::ALL {
            assert_eq!(Category::parse(category.title()), Some(category));
        }
        assert_eq!(Category::parse(" Food "), Some(Category::Food));
        assert_eq!(Category::parse("travel"), None);
    }
}
