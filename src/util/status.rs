use std::borrow::Cow;

/// Status labels are percent-encoded when outline keywords are pushed
/// upstream, since keywords cannot carry spaces. Reads reverse that
/// encoding; the two functions are exact inverses.
pub fn encode(label: &str) -> String {
    urlencoding::encode(label).into_owned()
}

/// Decode a status label. Labels that never needed encoding pass through
/// unchanged; undecodable input degrades to the raw text.
pub fn decode(label: &str) -> String {
    match urlencoding::decode(label) {
        Ok(Cow::Borrowed(s)) => s.to_string(),
        Ok(Cow::Owned(s)) => s,
        Err(_) => label.to_string(),
    }
}
