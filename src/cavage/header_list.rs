use crate::Error;
use std::{fmt, str::FromStr};

/// Ordered list of the header names covered by a signature
///
/// Order and duplicates are kept exactly as declared. Each entry turns into one line of the signing string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeaderList {
    names: Vec<String>,
}

impl HeaderList {
    /// Build a header list from already split names
    pub fn new<I, S>(names: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names = names
            .into_iter()
            .map(|name| name.as_ref().to_lowercase())
            .collect::<Vec<_>>();

        if names.is_empty() {
            return Err(Error::EmptyHeaderList);
        }

        Ok(Self { names })
    }

    /// Header names in signing order
    pub fn names(&self) -> impl Iterator<Item = &str> + Clone {
        self.names.iter().map(String::as_str)
    }
}

impl FromStr for HeaderList {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.split_whitespace())
    }
}

impl fmt::Display for HeaderList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for item in itertools::intersperse(self.names(), " ") {
            f.write_str(item)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::HeaderList;
    use crate::Error;

    #[test]
    fn lowercases_and_keeps_order() {
        let list: HeaderList = "(request-target) Host DATE".parse().unwrap();
        assert_eq!(
            list.names().collect::<Vec<_>>(),
            ["(request-target)", "host", "date"]
        );
    }

    #[test]
    fn keeps_duplicates() {
        let list: HeaderList = "date host date".parse().unwrap();
        assert_eq!(list.names().collect::<Vec<_>>(), ["date", "host", "date"]);
    }

    #[test]
    fn collapses_whitespace() {
        let list: HeaderList = "  date \t host\n".parse().unwrap();
        assert_eq!(list.to_string(), "date host");
    }

    #[test]
    fn rejects_empty() {
        assert!(matches!(
            "".parse::<HeaderList>(),
            Err(Error::EmptyHeaderList)
        ));
        assert!(matches!(
            "   ".parse::<HeaderList>(),
            Err(Error::EmptyHeaderList)
        ));
    }
}
