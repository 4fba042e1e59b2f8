use crate::domain::model::SizeReport;

const KB: u64 = 1024;
const MB: u64 = 1024 * 1024;

/// Formats a byte count as `N bytes`, `N.NN KB` or `N.NN MB`.
pub fn format_size(bytes: u64) -> String {
    if bytes < KB {
        format!("{} bytes", bytes)
    } else if bytes < MB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    }
}

/// Percentage by which `converted_bytes` is smaller than `original_bytes`.
/// Zero for an empty original, negative when the text grew.
pub fn reduction_percent(original_bytes: u64, converted_bytes: u64) -> f64 {
    if original_bytes == 0 {
        return 0.0;
    }
    let original = original_bytes as f64;
    ((original - converted_bytes as f64) / original) * 100.0
}

/// Compares the raw upload size with the UTF-8 size of the converted text.
pub fn compute(original_bytes: u64, converted_text: &str) -> SizeReport {
    let converted_bytes = converted_text.len() as u64;

    SizeReport {
        original_bytes,
        converted_bytes,
        original_human: format_size(original_bytes),
        converted_human: format_size(converted_bytes),
        reduction_percent: reduction_percent(original_bytes, converted_bytes),
    }
}

impl SizeReport {
    pub fn is_reduced(&self) -> bool {
        self.reduction_percent > 0.0
    }

    pub fn efficiency_message(&self) -> String {
        if self.is_reduced() {
            format!("{:.1}% Smaller", self.reduction_percent)
        } else {
            "The converted text is not smaller than the original file".to_string()
        }
    }
}
