//! Rule-driven builder for hierarchical election identifiers.
//!
//! Identifiers are dot-delimited, lowercase ASCII strings such as
//! `local.test-org.test-ward.2018-05-03`. The segments that are allowed,
//! and the segments that are required, vary per election type: the grammar
//! for each type is compiled once from a datapackage into a [`RuleSet`],
//! and an [`IdBuilder`] validates every input against the compiled rule
//! before composing the identifier for each hierarchy level.

mod config;
pub mod datapackage;
pub mod manual;
pub mod slugger;

use chrono::NaiveDate;
use log::debug;
use std::collections::HashMap;

pub use crate::config::*;
use crate::slugger::slugify;

/// The inputs accepted by `with_contest_type` as meaning "by-election".
const BY_ELECTION_SYNONYMS: [&str; 3] = ["by", "by election", "by-election"];
/// The input that explicitly marks an ordinary scheduled contest.
const SCHEDULED_CONTEST: &str = "election";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// The compiled grammar rules for a set of election types.
///
/// Built once at startup and immutable afterwards; a `RuleSet` can be
/// shared by reference across threads, each identifier construction
/// sequence holding its own [`IdBuilder`].
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct RuleSet {
    rules: HashMap<String, CompiledRule>,
}

impl RuleSet {
    /// Compiles a set of election type definitions.
    ///
    /// A malformed datapackage (duplicate keys, or a capability flag
    /// missing from both a type and one of its subtypes) is a fatal
    /// condition for the caller, not something recovered per request.
    pub fn compile(defs: &[ElectionTypeDef]) -> Result<RuleSet, ConfigError> {
        let mut rules: HashMap<String, CompiledRule> = HashMap::with_capacity(defs.len());
        for def in defs {
            if rules.contains_key(&def.election_type) {
                return Err(ConfigError::DuplicateElectionType(def.election_type.clone()));
            }
            let rule = compile_rule(def)?;
            debug!("compile: {} -> {:?}", def.election_type, rule);
            rules.insert(def.election_type.clone(), rule);
        }
        Ok(RuleSet { rules })
    }

    /// The rule set for the built-in UK datapackage.
    pub fn uk() -> RuleSet {
        RuleSet::compile(&datapackage::election_types())
            .expect("the built-in datapackage is well formed")
    }

    pub fn rule(&self, election_type: &str) -> Option<&CompiledRule> {
        self.rules.get(election_type)
    }

    /// The known election type keys, in sorted order.
    pub fn election_types(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.rules.keys().map(|k| k.as_str()).collect();
        keys.sort_unstable();
        keys
    }

    /// Starts an identifier for the given election type and poll date.
    ///
    /// The date must be a real calendar date in `YYYY-MM-DD` form.
    pub fn id_builder(&self, election_type: &str, date: &str) -> Result<IdBuilder<'_>, IdError> {
        let rule = self
            .rules
            .get(election_type)
            .ok_or_else(|| IdError::UnknownElectionType(election_type.to_string()))?;
        if rule.reserved {
            return Err(IdError::NotYetSupported(election_type.to_string()));
        }
        let date = NaiveDate::parse_from_str(date, DATE_FORMAT)
            .map_err(|_| IdError::InvalidDate(date.to_string()))?;
        Ok(IdBuilder {
            rule,
            election_type: election_type.to_string(),
            date,
            subtype: None,
            organisation: None,
            division: None,
            by_election: false,
        })
    }
}

fn compile_rule(def: &ElectionTypeDef) -> Result<CompiledRule, ConfigError> {
    let subtypes: Option<Vec<String>> = if def.subtypes.is_empty() {
        None
    } else {
        let mut codes: Vec<String> = Vec::with_capacity(def.subtypes.len());
        for s in &def.subtypes {
            if codes.iter().any(|c| c == &s.subtype) {
                return Err(ConfigError::DuplicateSubtype {
                    election_type: def.election_type.clone(),
                    subtype: s.subtype.clone(),
                });
            }
            codes.push(s.subtype.clone());
        }
        Some(codes)
    };
    let can_have_orgs = compile_capability(def, "can_have_orgs", def.can_have_orgs, |s| {
        s.can_have_orgs
    })?;
    let can_have_divs = compile_capability(def, "can_have_divs", def.can_have_divs, |s| {
        s.can_have_divs
    })?;
    Ok(CompiledRule {
        name: def.name.clone(),
        default_voting_system: def.default_voting_system.clone(),
        reserved: def.reserved,
        subtypes,
        can_have_orgs,
        can_have_divs,
    })
}

// A type-wide flag wins; otherwise every subtype must carry its own flag.
fn compile_capability(
    def: &ElectionTypeDef,
    field: &'static str,
    type_wide: Option<bool>,
    subtype_flag: impl Fn(&SubtypeDef) -> Option<bool>,
) -> Result<Capability, ConfigError> {
    if let Some(flag) = type_wide {
        return Ok(Capability::Uniform(flag));
    }
    if def.subtypes.is_empty() {
        return Err(ConfigError::MissingCapability {
            election_type: def.election_type.clone(),
            subtype: None,
            field,
        });
    }
    let mut flags: HashMap<String, bool> = HashMap::with_capacity(def.subtypes.len());
    for s in &def.subtypes {
        let flag = subtype_flag(s).ok_or_else(|| ConfigError::MissingCapability {
            election_type: def.election_type.clone(),
            subtype: Some(s.subtype.clone()),
            field,
        })?;
        flags.insert(s.subtype.clone(), flag);
    }
    Ok(Capability::PerSubtype(flags))
}

/// Accumulates the parts of an election identifier and produces the
/// canonical string for each hierarchy level.
///
/// Every setter consumes the builder and returns an updated value, so a
/// builder is never shared in a half-mutated state; equality is structural.
/// Setters may be called in any order. Capability violations are rejected
/// at the setter, completeness requirements only when the corresponding
/// level is requested.
///
/// ```
/// use election_ids::RuleSet;
/// # use election_ids::IdError;
///
/// let rules = RuleSet::uk();
/// let id = rules.id_builder("local", "2018-05-03")?
///     .with_organisation("Test Org")?
///     .with_division("Test Division")?;
///
/// assert_eq!(id.ballot_id()?, "local.test-org.test-division.2018-05-03");
///
/// # Ok::<(), IdError>(())
/// ```
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct IdBuilder<'r> {
    rule: &'r CompiledRule,
    election_type: String,
    date: NaiveDate,
    subtype: Option<String>,
    organisation: Option<String>,
    division: Option<String>,
    by_election: bool,
}

impl<'r> IdBuilder<'r> {
    /// Records the election subtype. Changing the subtype also changes
    /// which per-subtype capability applies to later setters.
    pub fn with_subtype(mut self, subtype: &str) -> Result<Self, IdError> {
        if self.rule.subtypes.is_none() {
            return Err(IdError::SubtypeNotApplicable(self.election_type));
        }
        if !self.rule.has_subtype(subtype) {
            return Err(IdError::UnknownSubtype {
                election_type: self.election_type,
                subtype: subtype.to_string(),
            });
        }
        self.subtype = Some(subtype.to_string());
        Ok(self)
    }

    /// Records the organisation, normalising the name to a slug.
    ///
    /// An empty input clears the field and always succeeds, even for
    /// election types that cannot have an organisation.
    pub fn with_organisation(mut self, organisation: &str) -> Result<Self, IdError> {
        let slug = slugify(organisation);
        if slug.is_empty() {
            self.organisation = None;
            return Ok(self);
        }
        if !self.can_have_orgs()? {
            return Err(IdError::OrganisationNotAllowed(self.election_type));
        }
        self.organisation = Some(slug);
        Ok(self)
    }

    /// Records the division, normalising the name to a slug.
    ///
    /// The division may be set before the organisation; whether a division
    /// also needs an organisation is only checked at ballot id time.
    pub fn with_division(mut self, division: &str) -> Result<Self, IdError> {
        let slug = slugify(division);
        if slug.is_empty() {
            self.division = None;
            return Ok(self);
        }
        if !self.can_have_divs()? {
            return Err(IdError::DivisionNotAllowed(self.election_type));
        }
        self.division = Some(slug);
        Ok(self)
    }

    /// Records whether this is a by-election. Matching is case-insensitive;
    /// `election` marks an ordinary scheduled contest and an empty input is
    /// a no-op.
    pub fn with_contest_type(mut self, contest_type: &str) -> Result<Self, IdError> {
        let lowered = contest_type.to_lowercase();
        if BY_ELECTION_SYNONYMS.contains(&lowered.as_str()) {
            self.by_election = true;
        } else if lowered == SCHEDULED_CONTEST {
            self.by_election = false;
        } else if !lowered.is_empty() {
            return Err(IdError::InvalidContestType(contest_type.to_string()));
        }
        Ok(self)
    }

    fn can_have_orgs(&self) -> Result<bool, IdError> {
        self.rule
            .can_have_orgs
            .resolve(self.subtype.as_deref())
            .ok_or_else(|| IdError::SubtypeRequired(self.election_type.clone()))
    }

    fn can_have_divs(&self) -> Result<bool, IdError> {
        self.rule
            .can_have_divs
            .resolve(self.subtype.as_deref())
            .ok_or_else(|| IdError::SubtypeRequired(self.election_type.clone()))
    }

    // The completeness requirements, per level, in one place.
    fn validate_for(&self, level: IdLevel) -> Result<(), IdError> {
        match level {
            // The top-level group id has no further requirements.
            IdLevel::ElectionGroup => Ok(()),
            IdLevel::SubtypeGroup => {
                if self.rule.subtypes.is_none() {
                    return Err(IdError::SubtypeNotApplicable(self.election_type.clone()));
                }
                if self.subtype.is_none() {
                    return Err(IdError::SubtypeRequired(self.election_type.clone()));
                }
                Ok(())
            }
            IdLevel::OrganisationGroup => {
                if self.rule.subtypes.is_some() && self.subtype.is_none() {
                    return Err(IdError::SubtypeRequired(self.election_type.clone()));
                }
                if !self.can_have_orgs()? {
                    return Err(IdError::OrganisationNotSupported(self.election_type.clone()));
                }
                if self.organisation.is_none() {
                    return Err(IdError::OrganisationRequired(self.election_type.clone()));
                }
                Ok(())
            }
            IdLevel::Ballot => {
                if self.rule.subtypes.is_some() && self.subtype.is_none() {
                    return Err(IdError::SubtypeRequired(self.election_type.clone()));
                }
                if self.can_have_orgs()? && self.organisation.is_none() {
                    return Err(IdError::OrganisationRequired(self.election_type.clone()));
                }
                if self.can_have_divs()? && self.division.is_none() {
                    return Err(IdError::DivisionRequired(self.election_type.clone()));
                }
                Ok(())
            }
        }
    }

    // Composes the identifier for a level that has already been validated.
    fn compose(&self, level: IdLevel) -> String {
        let mut parts: Vec<String> = vec![self.election_type.clone()];
        match level {
            IdLevel::ElectionGroup => {}
            IdLevel::SubtypeGroup => {
                if let Some(subtype) = &self.subtype {
                    parts.push(subtype.clone());
                }
            }
            IdLevel::OrganisationGroup => {
                if let Some(subtype) = &self.subtype {
                    parts.push(subtype.clone());
                }
                if let Some(organisation) = &self.organisation {
                    parts.push(organisation.clone());
                }
            }
            IdLevel::Ballot => {
                if let Some(subtype) = &self.subtype {
                    parts.push(subtype.clone());
                }
                if let Some(organisation) = &self.organisation {
                    parts.push(organisation.clone());
                }
                if let Some(division) = &self.division {
                    parts.push(division.clone());
                }
                if self.by_election {
                    parts.push("by".to_string());
                }
            }
        }
        parts.push(self.date.format(DATE_FORMAT).to_string());
        parts.join(".")
    }

    /// Produces the identifier at the given hierarchy level, after checking
    /// the level's completeness requirements.
    pub fn id_for(&self, level: IdLevel) -> Result<String, IdError> {
        self.validate_for(level)?;
        Ok(self.compose(level))
    }

    /// `election_type.date`
    pub fn election_group_id(&self) -> Result<String, IdError> {
        self.id_for(IdLevel::ElectionGroup)
    }

    /// `election_type.subtype.date`
    pub fn subtype_group_id(&self) -> Result<String, IdError> {
        self.id_for(IdLevel::SubtypeGroup)
    }

    /// `election_type.[subtype.]organisation.date`
    pub fn organisation_group_id(&self) -> Result<String, IdError> {
        self.id_for(IdLevel::OrganisationGroup)
    }

    /// `election_type.[subtype.][organisation.][division.][by.]date`
    pub fn ballot_id(&self) -> Result<String, IdError> {
        self.id_for(IdLevel::Ballot)
    }

    /// Every identifier obtainable from the current state, in hierarchy
    /// order. Levels whose requirements are not met are skipped, and an id
    /// textually identical to an earlier one appears only once.
    pub fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = Vec::new();
        for level in IdLevel::ALL {
            match self.id_for(level) {
                Ok(id) => {
                    if !ids.contains(&id) {
                        ids.push(id);
                    }
                }
                Err(e) => debug!("ids: skipping {:?}: {}", level, e),
            }
        }
        ids
    }
}
