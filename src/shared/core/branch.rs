use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Physical barbershop location. Every external spelling is resolved here, once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Branch {
    Brasil,
    ManuelRodriguez,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown branch: {0}")]
pub struct UnknownBranch(pub String);

impl Branch {
    pub const ALL: [Branch; 2] = [Branch::Brasil, Branch::ManuelRodriguez];

    pub fn code(&self) -> &'static str {
        match self {
            Branch::Brasil => "brasil",
            Branch::ManuelRodriguez => "manuel-rodriguez",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Branch::Brasil => "Brasil",
            Branch::ManuelRodriguez => "Manuel Rodríguez",
        }
    }
}

impl FromStr for Branch {
    type Err = UnknownBranch;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized: String = raw
            .trim()
            .to_lowercase()
            .chars()
            .map(|c| match c {
                '_' | ' ' => '-',
                'í' => 'i',
                other => other,
            })
            .collect();
        match normalized.as_str() {
            "brasil" => Ok(Branch::Brasil),
            "manuel-rodriguez" => Ok(Branch::ManuelRodriguez),
            _ => Err(UnknownBranch(raw.to_string())),
        }
    }
}

impl TryFrom<String> for Branch {
    type Error = UnknownBranch;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Branch> for String {
    fn from(branch: Branch) -> Self {
        branch.code().to_string()
    }
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(test)]
mod branch_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("brasil", Branch::Brasil)]
    #[case(" Brasil ", Branch::Brasil)]
    #[case("manuel-rodriguez", Branch::ManuelRodriguez)]
    #[case("manuel_rodriguez", Branch::ManuelRodriguez)]
    #[case("Manuel Rodríguez", Branch::ManuelRodriguez)]
    #[case("MANUEL RODRIGUEZ", Branch::ManuelRodriguez)]
    fn it_should_parse_every_known_spelling(#[case] raw: &str, #[case] expected: Branch) {
        assert_eq!(raw.parse::<Branch>(), Ok(expected));
    }

    #[rstest]
    fn it_should_reject_an_unknown_branch() {
        assert_eq!(
            "providencia".parse::<Branch>(),
            Err(UnknownBranch("providencia".to_string()))
        );
    }

    #[rstest]
    fn it_should_serialize_as_its_canonical_code() {
        let json = serde_json::to_string(&Branch::ManuelRodriguez).unwrap();
        assert_eq!(json, "\"manuel-rodriguez\"");
        let back: Branch = serde_json::from_str("\"manuel_rodriguez\"").unwrap();
        assert_eq!(back, Branch::ManuelRodriguez);
    }

    #[rstest]
    fn it_should_display_the_human_name() {
        assert_eq!(Branch::ManuelRodriguez.to_string(), "Manuel Rodríguez");
        assert_eq!(Branch::Brasil.to_string(), "Brasil");
    }
}
