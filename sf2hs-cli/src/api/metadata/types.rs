//! Field data types on both sides of the sync and the table that maps one to the other

use serde::{Deserialize, Serialize};
use std::fmt;

/// Salesforce field data types as reported by the describe API (`type` attribute)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SalesforceType {
    Id,
    String,
    TextArea,
    Picklist,
    MultiPicklist,
    Combobox,
    Boolean,
    Currency,
    Double,
    Percent,
    Int,
    Long,
    Date,
    DateTime,
    Time,
    Email,
    Phone,
    Url,
    Reference,
    EncryptedString,
    Base64,
    Address,
    Location,
    AnyType,
    Other(String),
}

impl SalesforceType {
    /// Every named variant, in table order
    pub const ALL: &'static [SalesforceType] = &[
        SalesforceType::Id,
        SalesforceType::String,
        SalesforceType::TextArea,
        SalesforceType::Picklist,
        SalesforceType::MultiPicklist,
        SalesforceType::Combobox,
        SalesforceType::Boolean,
        SalesforceType::Currency,
        SalesforceType::Double,
        SalesforceType::Percent,
        SalesforceType::Int,
        SalesforceType::Long,
        SalesforceType::Date,
        SalesforceType::DateTime,
        SalesforceType::Time,
        SalesforceType::Email,
        SalesforceType::Phone,
        SalesforceType::Url,
        SalesforceType::Reference,
        SalesforceType::EncryptedString,
        SalesforceType::Base64,
        SalesforceType::Address,
        SalesforceType::Location,
        SalesforceType::AnyType,
    ];

    /// Parse the describe API name (case-insensitive)
    pub fn from_api_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "id" => Self::Id,
            "string" => Self::String,
            "textarea" => Self::TextArea,
            "picklist" => Self::Picklist,
            "multipicklist" => Self::MultiPicklist,
            "combobox" => Self::Combobox,
            "boolean" => Self::Boolean,
            "currency" => Self::Currency,
            "double" => Self::Double,
            "percent" => Self::Percent,
            "int" => Self::Int,
            "long" => Self::Long,
            "date" => Self::Date,
            "datetime" => Self::DateTime,
            "time" => Self::Time,
            "email" => Self::Email,
            "phone" => Self::Phone,
            "url" => Self::Url,
            "reference" => Self::Reference,
            "encryptedstring" => Self::EncryptedString,
            "base64" => Self::Base64,
            "address" => Self::Address,
            "location" => Self::Location,
            "anytype" => Self::AnyType,
            _ => Self::Other(name.to_string()),
        }
    }

    /// Name used by the describe API
    pub fn api_name(&self) -> &str {
        match self {
            Self::Id => "id",
            Self::String => "string",
            Self::TextArea => "textarea",
            Self::Picklist => "picklist",
            Self::MultiPicklist => "multipicklist",
            Self::Combobox => "combobox",
            Self::Boolean => "boolean",
            Self::Currency => "currency",
            Self::Double => "double",
            Self::Percent => "percent",
            Self::Int => "int",
            Self::Long => "long",
            Self::Date => "date",
            Self::DateTime => "datetime",
            Self::Time => "time",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Url => "url",
            Self::Reference => "reference",
            Self::EncryptedString => "encryptedstring",
            Self::Base64 => "base64",
            Self::Address => "address",
            Self::Location => "location",
            Self::AnyType => "anyType",
            Self::Other(name) => name,
        }
    }

    pub fn is_picklist(&self) -> bool {
        matches!(self, Self::Picklist | Self::MultiPicklist | Self::Combobox)
    }
}

impl From<String> for SalesforceType {
    fn from(value: String) -> Self {
        Self::from_api_name(&value)
    }
}

impl From<SalesforceType> for String {
    fn from(value: SalesforceType) -> Self {
        value.api_name().to_string()
    }
}

impl fmt::Display for SalesforceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.api_name())
    }
}

/// HubSpot property data types (`type` attribute of the properties API)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum HubSpotType {
    String,
    Number,
    Date,
    DateTime,
    Enumeration,
    Bool,
    Other(String),
}

impl HubSpotType {
    /// Type a HubSpot property must have to hold values of the given Salesforce type
    pub fn for_salesforce(source: &SalesforceType) -> Self {
        use SalesforceType as Sf;

        match source {
            Sf::Picklist | Sf::MultiPicklist | Sf::Combobox => Self::Enumeration,
            Sf::Currency | Sf::Double | Sf::Percent | Sf::Int | Sf::Long => Self::Number,
            Sf::Boolean => Self::Bool,
            Sf::Date | Sf::DateTime => Self::Date,
            Sf::Id
            | Sf::String
            | Sf::TextArea
            | Sf::Email
            | Sf::Phone
            | Sf::Url
            | Sf::Reference
            | Sf::EncryptedString
            | Sf::Time
            | Sf::Base64
            | Sf::Address
            | Sf::Location
            | Sf::AnyType
            | Sf::Other(_) => Self::String,
        }
    }

    pub fn from_api_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "string" => Self::String,
            "number" => Self::Number,
            "date" => Self::Date,
            "datetime" => Self::DateTime,
            "enumeration" => Self::Enumeration,
            "bool" => Self::Bool,
            _ => Self::Other(name.to_string()),
        }
    }

    pub fn api_name(&self) -> &str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Date => "date",
            Self::DateTime => "datetime",
            Self::Enumeration => "enumeration",
            Self::Bool => "bool",
            Self::Other(name) => name,
        }
    }

    /// Form control HubSpot pairs with this type when a property is created or retyped
    pub fn default_field_type(&self, source: Option<&SalesforceType>) -> &'static str {
        match self {
            Self::String => match source {
                Some(SalesforceType::TextArea) => "textarea",
                Some(SalesforceType::Phone) => "phonenumber",
                _ => "text",
            },
            Self::Number => "number",
            Self::Date | Self::DateTime => "date",
            Self::Enumeration => match source {
                Some(SalesforceType::MultiPicklist) => "checkbox",
                _ => "select",
            },
            Self::Bool => "booleancheckbox",
            Self::Other(_) => "text",
        }
    }
}

impl From<String> for HubSpotType {
    fn from(value: String) -> Self {
        Self::from_api_name(&value)
    }
}

impl From<HubSpotType> for String {
    fn from(value: HubSpotType) -> Self {
        value.api_name().to_string()
    }
}

impl fmt::Display for HubSpotType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.api_name())
    }
}
