use std::fmt;

use chrono::NaiveDate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Northeast,
    West,
    Midwest,
    South,
}

/// Lifecycle flag shared by stores and customers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActivityStatus {
    Active,
    Inactive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProductStatus {
    Active,
    Discontinued,
}

/// Category labels as they appear in the catalog, including the
/// inconsistent spellings of the same category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoryLabel {
    Electronics,
    LowercaseElectronics,
    AbbreviatedElectronics,
    Accessories,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Segment {
    Retail,
    Corporate,
    Wholesale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    Completed,
    Cancelled,
    Returned,
}

impl Region {
    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Northeast => "Northeast",
            Region::West => "West",
            Region::Midwest => "Midwest",
            Region::South => "South",
        }
    }
}

impl ActivityStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityStatus::Active => "Active",
            ActivityStatus::Inactive => "Inactive",
        }
    }
}

impl ProductStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductStatus::Active => "Active",
            ProductStatus::Discontinued => "Discontinued",
        }
    }
}

impl CategoryLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryLabel::Electronics => "Electronics",
            CategoryLabel::LowercaseElectronics => "electronics",
            CategoryLabel::AbbreviatedElectronics => "Elec",
            CategoryLabel::Accessories => "Accessories",
        }
    }
}

impl Segment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Segment::Retail => "Retail",
            Segment::Corporate => "Corporate",
            Segment::Wholesale => "Wholesale",
        }
    }
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Completed => "Completed",
            OrderStatus::Cancelled => "Cancelled",
            OrderStatus::Returned => "Returned",
        }
    }
}

macro_rules! display_as_str {
    ($($ty:ty),* $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }
        )*
    };
}

display_as_str!(
    Region,
    ActivityStatus,
    ProductStatus,
    CategoryLabel,
    Segment,
    OrderStatus
);

#[derive(Debug, Clone, PartialEq)]
pub struct Store {
    pub id: String,
    pub name: String,
    pub city: String,
    pub state: String,
    pub region: Region,
    pub status: ActivityStatus,
    pub open_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub category: CategoryLabel,
    pub standard_cost: f64,
    pub list_price: f64,
    pub status: ProductStatus,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    pub id: String,
    pub full_name: String,
    pub segment: Segment,
    pub city: String,
    pub state: String,
    pub country: String,
    pub status: ActivityStatus,
}

/// One line of the transaction table. `order_date` and `customer_id` are
/// nullable because the defect pass blanks them on purpose.
#[derive(Debug, Clone, PartialEq)]
pub struct Sale {
    pub order_id: String,
    pub order_date: Option<NaiveDate>,
    pub customer_id: Option<String>,
    pub product_id: String,
    pub store_id: String,
    pub quantity: u32,
    pub unit_price: f64,
    pub discount: Option<f64>,
    pub revenue: f64,
    pub cost: f64,
    pub profit: f64,
    pub status: OrderStatus,
}

impl Store {
    pub fn is_active(&self) -> bool {
        self.status == ActivityStatus::Active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_labels_render_with_injected_spellings() {
        let rendered = [
            CategoryLabel::Electronics,
            CategoryLabel::LowercaseElectronics,
            CategoryLabel::AbbreviatedElectronics,
            CategoryLabel::Accessories,
        ]
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>();
        assert_eq!(rendered, ["Electronics", "electronics", "Elec", "Accessories"]);
    }

    #[test]
    fn statuses_display_title_case() {
        assert_eq!(ActivityStatus::Inactive.to_string(), "Inactive");
        assert_eq!(ProductStatus::Discontinued.to_string(), "Discontinued");
        assert_eq!(OrderStatus::Returned.to_string(), "Returned");
        assert_eq!(Region::Midwest.to_string(), "Midwest");
    }
}
