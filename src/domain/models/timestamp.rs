use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(chrono::NaiveDateTime);
impl Timestamp {
    pub fn now() -> Self {
        Self(chrono::Utc::now().naive_utc())
    }
}

impl Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{}", self.0.format("%Y-%m-%d %H:%M:%S")))
    }
}
