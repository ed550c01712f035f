use aliri_braid::braid;
use std::fmt;

macro_rules! limited_reveal {
    ($ty:ty: $hidden:literal, $default:literal) => {
        impl fmt::Debug for $ty {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                if f.alternate() {
                    f.write_str("\"")?;
                    limited_reveal(self.as_str(), &mut *f, $default)?;
                    f.write_str("\"")
                } else {
                    f.write_str(concat!("***", $hidden, "***"))
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                if f.alternate() {
                    limited_reveal(self.as_str(), &mut *f, usize::MAX)
                } else {
                    f.write_str(concat!("***", $hidden, "***"))
                }
            }
        }
    };
}

/// Writes at most `default_len` characters (or the formatter's width) of a
/// protected value, ending in an ellipsis when truncated
fn limited_reveal(unprotected: &str, f: &mut fmt::Formatter, default_len: usize) -> fmt::Result {
    let max_len = f.width().unwrap_or(default_len);
    if max_len <= 1 {
        return f.write_str("…");
    }

    match unprotected.char_indices().nth(max_len - 1) {
        Some((idx, _)) => {
            f.write_str(&unprotected[..idx])?;
            f.write_str("…")
        }
        None => f.write_str(unprotected),
    }
}

/// The client key presented to the authorization endpoint
#[braid(serde)]
pub struct ClientKey;

/// The client secret paired with a [`ClientKey`]
#[braid(serde, debug = "owned", display = "owned")]
pub struct ClientSecret;

limited_reveal!(ClientSecretRef: "CLIENT SECRET", 4);

/// A bearer access token issued by the authorization endpoint
#[braid(serde, debug = "owned", display = "owned")]
pub struct AccessToken;

limited_reveal!(AccessTokenRef: "ACCESS TOKEN", 12);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secrets_are_hidden_by_default() {
        let secret = ClientSecret::from_static("hunter2-hunter2");
        assert_eq!(format!("{}", secret), "***CLIENT SECRET***");
        assert_eq!(format!("{:?}", secret), "***CLIENT SECRET***");
    }

    #[test]
    fn alternate_debug_reveals_a_prefix() {
        let token = AccessToken::from_static("abcdefghijklmnopqrstuvwxyz");
        assert_eq!(format!("{:#?}", token), "\"abcdefghijk…\"");
        assert_eq!(format!("{:#5?}", token), "\"abcd…\"");
    }

    #[test]
    fn alternate_display_reveals_everything() {
        let token = AccessToken::from_static("abcdefghijklmnopqrstuvwxyz");
        assert_eq!(format!("{:#}", token), "abcdefghijklmnopqrstuvwxyz");
    }

    #[test]
    fn short_values_are_not_truncated() {
        let secret = ClientSecret::from_static("abc");
        assert_eq!(format!("{:#?}", secret), "\"abc\"");
    }
}
