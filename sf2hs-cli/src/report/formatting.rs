//! Excel cell formats shared by fields files and sync reports

use rust_xlsxwriter::{Color, Format, FormatBorder};

use crate::sync::types::{Decision, SyncOutcome};

pub fn create_header_format() -> Format {
    Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0x4472C4))
        .set_font_color(Color::White)
        .set_border(FormatBorder::Thin)
}

pub fn create_title_format() -> Format {
    Format::new().set_bold().set_font_size(14)
}

pub fn create_label_format() -> Format {
    Format::new().set_bold()
}

/// Rows for fields that cannot be migrated
pub fn create_blocked_format() -> Format {
    Format::new().set_font_color(Color::RGB(0x9C0006)).set_italic()
}

pub fn create_success_format() -> Format {
    Format::new().set_background_color(Color::RGB(0xC6EFCE))
}

pub fn create_warning_format() -> Format {
    Format::new().set_background_color(Color::RGB(0xFFEB9C))
}

pub fn create_error_format() -> Format {
    Format::new().set_background_color(Color::RGB(0xFFC7CE))
}

pub fn create_neutral_format() -> Format {
    Format::new()
}

pub fn decision_format(decision: Decision) -> Format {
    match decision {
        Decision::Create | Decision::Update => create_warning_format(),
        Decision::SkipUnchanged => create_success_format(),
        Decision::SkipUnmigratable => create_neutral_format(),
        Decision::ErrorMissingSource => create_error_format(),
    }
}

pub fn outcome_format(outcome: SyncOutcome) -> Format {
    match outcome {
        SyncOutcome::Applied => create_success_format(),
        SyncOutcome::Failed => create_error_format(),
        SyncOutcome::Skipped => create_neutral_format(),
    }
}
