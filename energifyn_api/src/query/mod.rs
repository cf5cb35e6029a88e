mod common;
pub use self::common::Query;

mod price;
pub use self::price::PriceQuery;
