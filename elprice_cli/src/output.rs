use elprice_lib::PriceReading;

#[derive(Clone, Debug, PartialEq)]
pub enum OutputFormat {
    Text,
    Json,
}

pub fn format_reading(reading: &PriceReading) -> String {
    format!(
        "Current price = {:.2} (date {}, fetched {})",
        reading.price,
        reading.date,
        reading.fetched_at.format("%Y-%m-%d %H:%M:%S")
    )
}

pub fn print_reading(reading: &PriceReading, format: &OutputFormat) {
    match format {
        OutputFormat::Text => println!("{}", format_reading(reading)),
        OutputFormat::Json => print_json(reading),
    }
}

pub fn print_json<T: serde::Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}
