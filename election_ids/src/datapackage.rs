//! The built-in datapackage: every election type this crate knows how to
//! build identifiers for, with its subtypes and capability flags.
//!
//! `ref` and `eu` are reserved: they are recognised keys but their id
//! grammars are not implemented, so using them fails with
//! [`IdError::NotYetSupported`](crate::IdError::NotYetSupported).

use crate::config::{ElectionTypeDef, SubtypeDef};

fn subtype(name: &str, code: &str) -> SubtypeDef {
    SubtypeDef {
        name: name.to_string(),
        subtype: code.to_string(),
        can_have_orgs: None,
        can_have_divs: None,
    }
}

pub fn election_types() -> Vec<ElectionTypeDef> {
    vec![
        ElectionTypeDef {
            election_type: "parl".to_string(),
            name: "UK Parliament Elections".to_string(),
            default_voting_system: Some("FPTP".to_string()),
            subtypes: vec![],
            can_have_orgs: Some(false),
            can_have_divs: Some(true),
            reserved: false,
        },
        ElectionTypeDef {
            election_type: "nia".to_string(),
            name: "Northern Ireland Assembly Elections".to_string(),
            default_voting_system: Some("STV".to_string()),
            subtypes: vec![],
            can_have_orgs: Some(false),
            can_have_divs: Some(true),
            reserved: false,
        },
        ElectionTypeDef {
            election_type: "naw".to_string(),
            name: "Welsh Assembly Elections".to_string(),
            default_voting_system: Some("AMS".to_string()),
            subtypes: vec![
                subtype("Constituencies", "c"),
                subtype("Regions", "r"),
            ],
            can_have_orgs: Some(false),
            can_have_divs: Some(true),
            reserved: false,
        },
        ElectionTypeDef {
            election_type: "sp".to_string(),
            name: "Scottish Parliament Elections".to_string(),
            default_voting_system: Some("AMS".to_string()),
            subtypes: vec![
                subtype("Constituencies", "c"),
                subtype("Regions", "r"),
            ],
            can_have_orgs: Some(false),
            can_have_divs: Some(true),
            reserved: false,
        },
        ElectionTypeDef {
            election_type: "gla".to_string(),
            name: "Greater London Assembly Elections".to_string(),
            default_voting_system: Some("AMS".to_string()),
            // Divisions only make sense for the constituency seats, so the
            // flag is declared per subtype here.
            subtypes: vec![
                SubtypeDef {
                    name: "Constituencies".to_string(),
                    subtype: "c".to_string(),
                    can_have_orgs: None,
                    can_have_divs: Some(true),
                },
                SubtypeDef {
                    name: "Additional".to_string(),
                    subtype: "a".to_string(),
                    can_have_orgs: None,
                    can_have_divs: Some(false),
                },
            ],
            can_have_orgs: Some(false),
            can_have_divs: None,
            reserved: false,
        },
        ElectionTypeDef {
            election_type: "local".to_string(),
            name: "Local Elections".to_string(),
            default_voting_system: Some("FPTP".to_string()),
            subtypes: vec![],
            can_have_orgs: Some(true),
            can_have_divs: Some(true),
            reserved: false,
        },
        ElectionTypeDef {
            election_type: "pcc".to_string(),
            name: "Police and Crime Commissioner Elections".to_string(),
            default_voting_system: Some("sv".to_string()),
            subtypes: vec![],
            can_have_orgs: Some(true),
            can_have_divs: Some(false),
            reserved: false,
        },
        ElectionTypeDef {
            election_type: "mayor".to_string(),
            name: "Mayoral Elections".to_string(),
            default_voting_system: Some("sv".to_string()),
            subtypes: vec![],
            can_have_orgs: Some(true),
            can_have_divs: Some(false),
            reserved: false,
        },
        ElectionTypeDef {
            election_type: "ref".to_string(),
            name: "Referendums".to_string(),
            default_voting_system: None,
            subtypes: vec![],
            can_have_orgs: Some(false),
            can_have_divs: Some(false),
            reserved: true,
        },
        ElectionTypeDef {
            election_type: "eu".to_string(),
            name: "European Parliament Elections".to_string(),
            default_voting_system: None,
            subtypes: vec![],
            can_have_orgs: Some(false),
            can_have_divs: Some(false),
            reserved: true,
        },
    ]
}
