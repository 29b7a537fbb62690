//! HubSpot API access

pub mod client;

pub use client::HubSpotClient;

/// Property group used for new properties when the configuration names none
pub fn default_property_group(object_type: &str) -> String {
    match object_type.to_ascii_lowercase().as_str() {
        "companies" | "company" => "companyinformation".to_string(),
        "contacts" | "contact" => "contactinformation".to_string(),
        "deals" | "deal" => "dealinformation".to_string(),
        "tickets" | "ticket" => "ticketinformation".to_string(),
        "products" | "product" => "productinformation".to_string(),
        "line_items" | "line_item" => "lineiteminformation".to_string(),
        other => format!("{}_information", other.trim_end_matches('s')),
    }
}
