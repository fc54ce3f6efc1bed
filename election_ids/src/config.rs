// ********* Input data structures ***********

use std::collections::HashMap;
use std::error::Error;
use std::fmt::Display;

/// One election type record from a datapackage.
///
/// `can_have_orgs` and `can_have_divs` may be declared once for the whole
/// type, or left out here and declared on every subtype instead. A record
/// with neither form is malformed and rejected at compile time.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ElectionTypeDef {
    /// The short key used as the first identifier segment, e.g. `local`.
    pub election_type: String,
    pub name: String,
    pub default_voting_system: Option<String>,
    pub subtypes: Vec<SubtypeDef>,
    pub can_have_orgs: Option<bool>,
    pub can_have_divs: Option<bool>,
    /// Reserved types appear in the datapackage but have no id grammar yet.
    pub reserved: bool,
}

/// A named refinement of an election type, e.g. constituency vs. region.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct SubtypeDef {
    pub name: String,
    /// The subtype code used as an identifier segment, e.g. `c` or `r`.
    pub subtype: String,
    pub can_have_orgs: Option<bool>,
    pub can_have_divs: Option<bool>,
}

// ******** Compiled data structures *********

/// Whether an election type can carry an organisation or division segment.
///
/// The per-subtype form can only exist for a rule that declares subtypes;
/// the compiler never mixes the two representations.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum Capability {
    Uniform(bool),
    PerSubtype(HashMap<String, bool>),
}

impl Capability {
    /// Resolves the flag for the given subtype. Returns `None` when the
    /// capability varies per subtype and no subtype has been chosen yet.
    pub fn resolve(&self, subtype: Option<&str>) -> Option<bool> {
        match self {
            Capability::Uniform(flag) => Some(*flag),
            Capability::PerSubtype(flags) => subtype.and_then(|s| flags.get(s).copied()),
        }
    }
}

/// The id grammar for one election type, derived once from the datapackage
/// and shared read-only by every builder.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct CompiledRule {
    pub name: String,
    pub default_voting_system: Option<String>,
    pub reserved: bool,
    /// Subtype codes in declaration order, or `None` for types without
    /// subtypes.
    pub subtypes: Option<Vec<String>>,
    pub can_have_orgs: Capability,
    pub can_have_divs: Capability,
}

impl CompiledRule {
    pub fn has_subtype(&self, code: &str) -> bool {
        match &self.subtypes {
            Some(codes) => codes.iter().any(|c| c == code),
            None => false,
        }
    }
}

/// The four levels of the identifier hierarchy, from least to most specific.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum IdLevel {
    ElectionGroup,
    SubtypeGroup,
    OrganisationGroup,
    Ballot,
}

impl IdLevel {
    pub const ALL: [IdLevel; 4] = [
        IdLevel::ElectionGroup,
        IdLevel::SubtypeGroup,
        IdLevel::OrganisationGroup,
        IdLevel::Ballot,
    ];
}

// ********* Errors ***********

/// Validation failures while building an identifier.
///
/// All of these are local and immediate; nothing is retried or defaulted.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum IdError {
    UnknownElectionType(String),
    /// The type is in the datapackage but its grammar is not implemented.
    NotYetSupported(String),
    InvalidDate(String),
    SubtypeNotApplicable(String),
    UnknownSubtype {
        election_type: String,
        subtype: String,
    },
    SubtypeRequired(String),
    OrganisationNotAllowed(String),
    OrganisationRequired(String),
    OrganisationNotSupported(String),
    DivisionNotAllowed(String),
    DivisionRequired(String),
    InvalidContestType(String),
}

impl Error for IdError {}

impl Display for IdError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IdError::UnknownElectionType(t) => write!(f, "unknown election type {:?}", t),
            IdError::NotYetSupported(t) => {
                write!(f, "election type {:?} does not have an id grammar yet", t)
            }
            IdError::InvalidDate(d) => write!(f, "{:?} is not a valid YYYY-MM-DD date", d),
            IdError::SubtypeNotApplicable(t) => {
                write!(f, "election type {:?} may not have a subtype", t)
            }
            IdError::UnknownSubtype {
                election_type,
                subtype,
            } => write!(
                f,
                "{:?} is not a valid subtype for election type {:?}",
                subtype, election_type
            ),
            IdError::SubtypeRequired(t) => {
                write!(f, "election type {:?} must have a subtype", t)
            }
            IdError::OrganisationNotAllowed(t) => {
                write!(f, "election type {:?} may not have an organisation", t)
            }
            IdError::OrganisationRequired(t) => write!(
                f,
                "election type {:?} must have an organisation to create this id",
                t
            ),
            IdError::OrganisationNotSupported(t) => write!(
                f,
                "election type {:?} can not have an organisation group id",
                t
            ),
            IdError::DivisionNotAllowed(t) => {
                write!(f, "election type {:?} may not have a division", t)
            }
            IdError::DivisionRequired(t) => write!(
                f,
                "election type {:?} must have a division to create a ballot id",
                t
            ),
            IdError::InvalidContestType(v) => write!(
                f,
                "allowed values for the contest type are 'by', 'by election', 'by-election' or 'election', not {:?}",
                v
            ),
        }
    }
}

/// A malformed datapackage. Fatal at startup, never a per-call error.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum ConfigError {
    DuplicateElectionType(String),
    DuplicateSubtype {
        election_type: String,
        subtype: String,
    },
    /// A capability flag is missing both on the type and on a subtype.
    MissingCapability {
        election_type: String,
        subtype: Option<String>,
        field: &'static str,
    },
}

impl Error for ConfigError {}

impl Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::DuplicateElectionType(t) => {
                write!(f, "election type {:?} is declared twice", t)
            }
            ConfigError::DuplicateSubtype {
                election_type,
                subtype,
            } => write!(
                f,
                "subtype {:?} is declared twice for election type {:?}",
                subtype, election_type
            ),
            ConfigError::MissingCapability {
                election_type,
                subtype: Some(subtype),
                field,
            } => write!(
                f,
                "subtype {:?} of election type {:?} has no {} flag and the type declares no default",
                subtype, election_type, field
            ),
            ConfigError::MissingCapability {
                election_type,
                subtype: None,
                field,
            } => write!(
                f,
                "election type {:?} declares no {} flag",
                election_type, field
            ),
        }
    }
}
