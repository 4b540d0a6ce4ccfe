use serde::{Deserialize, Serialize};

/// Job identity printed on every sheet and used for the output file name.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobMeta {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub lot: String,
    #[serde(default)]
    pub job: String,
}

impl JobMeta {
    /// Parse names like `GWPMUUKACOO4E8 (Lot 1, Job 1).xlsx`.
    ///
    /// The code is everything before the first parenthesis; lot and job are
    /// the digits following the words `Lot` and `Job` in any case. Parts that
    /// are not found stay empty.
    pub fn from_file_name(file_name: &str) -> Self {
        let name = strip_extension(file_name);
        let code = match name.find('(') {
            Some(open) if open > 0 => name[..open].trim().to_string(),
            _ => String::new(),
        };
        JobMeta {
            code,
            lot: number_after(name, "lot").unwrap_or_default(),
            job: number_after(name, "job").unwrap_or_default(),
        }
    }

    /// `CODE (count) ( Lot L, Job J ).pdf`, leaving out the parts that are
    /// unknown.
    pub fn output_file_name(&self, count: usize) -> String {
        let code = if self.code.is_empty() {
            "OUTPUT"
        } else {
            self.code.as_str()
        };
        let parts: Vec<String> = [("Lot", &self.lot), ("Job", &self.job)]
            .into_iter()
            .filter(|(_, v)| !v.is_empty())
            .map(|(k, v)| format!("{k} {v}"))
            .collect();
        let extra = if parts.is_empty() {
            String::new()
        } else {
            format!(" ( {} )", parts.join(", "))
        };
        format!("{code} ({count}){extra}.pdf")
    }

    pub fn caption(&self, total_labels: usize, sheet_number: usize, total_sheets: usize) -> String {
        format!(
            "Lot: {} | {} | Qty: {} | SKU No: {} | Sheet {}/{}",
            self.lot, self.code, total_labels, self.job, sheet_number, total_sheets
        )
    }

    /// Fill empty fields from `other`.
    pub fn or(self, other: JobMeta) -> JobMeta {
        let pick = |a: String, b: String| if a.is_empty() { b } else { a };
        JobMeta {
            code: pick(self.code, other.code),
            lot: pick(self.lot, other.lot),
            job: pick(self.job, other.job),
        }
    }
}

fn strip_extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(dot) if dot + 1 < name.len() && !name[dot + 1..].contains('/') => &name[..dot],
        _ => name,
    }
}

/// Digits after the first occurrence of `keyword` (ASCII, case-insensitive)
/// that is followed by optional whitespace and at least one digit.
fn number_after(haystack: &str, keyword: &str) -> Option<String> {
    let lower = haystack.to_ascii_lowercase();
    let mut from = 0;
    while let Some(pos) = lower[from..].find(keyword) {
        let rest = haystack[from + pos + keyword.len()..].trim_start();
        let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
        if !digits.is_empty() {
            return Some(digits);
        }
        from += pos + keyword.len();
    }
    None
}
