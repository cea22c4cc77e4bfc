use std::str::FromStr;

use unicode_normalization::UnicodeNormalization;

use crate::error::{Error, ErrorKind};

/// Unicode normalization forms.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Form {
    #[default]
    Nfc,
    Nfd,
    Nfkc,
    Nfkd,
}
impl Form {
    pub fn as_str(&self) -> &'static str {
        match self {
            Form::Nfc => "nfc",
            Form::Nfd => "nfd",
            Form::Nfkc => "nfkc",
            Form::Nfkd => "nfkd",
        }
    }
}
impl std::fmt::Display for Form {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
impl FromStr for Form {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "nfc" => Ok(Form::Nfc),
            "nfd" => Ok(Form::Nfd),
            "nfkc" => Ok(Form::Nfkc),
            "nfkd" => Ok(Form::Nfkd),
            _ => exn::bail!(ErrorKind::UnknownForm(s.to_string())),
        }
    }
}

/// Normalize `text` to the given Unicode form.
///
/// ```rust
/// use rinse_text::{Form, normalize_unicode};
///
/// assert_eq!(normalize_unicode("e\u{301}", Form::Nfc), "é");
/// assert_eq!(normalize_unicode("ﬁ", Form::Nfkc), "fi");
/// ```
pub fn normalize_unicode(text: &str, form: Form) -> String {
    match form {
        Form::Nfc => text.nfc().collect(),
        Form::Nfd => text.nfd().collect(),
        Form::Nfkc => text.nfkc().collect(),
        Form::Nfkd => text.nfkd().collect(),
    }
}
