use energifyn_api::types::DateStamp;
use energifyn_api::{PriceQuery, Query};
use url::Url;

fn base_url() -> Url {
    Url::parse("https://api.energifyn.dk/api/graph/consumptionprice").unwrap()
}

#[test]
fn price_query_appends_date() {
    let query = PriceQuery::new(DateStamp::new(5, 3, 2024));
    let url = query.add_to_url(&base_url());
    assert_eq!(
        url.as_str(),
        "https://api.energifyn.dk/api/graph/consumptionprice?date=05-03-2024"
    );
}

#[test]
fn price_query_with_date_replaces_day() {
    let query = PriceQuery::new(DateStamp::new(5, 3, 2024)).with_date(DateStamp::new(12, 10, 2026));
    let url = query.add_to_url(&base_url());
    assert_eq!(url.query(), Some("date=12-10-2026"));
}

#[test]
fn default_query_is_today() {
    let query = PriceQuery::default();
    let today = chrono::Local::now().date_naive();
    // Allow for the test straddling midnight.
    let yesterday = today.pred_opt().unwrap();
    assert!(query.date == DateStamp::from(today) || query.date == DateStamp::from(yesterday));
}
