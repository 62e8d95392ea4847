use std::collections::BTreeMap;

/// Campaign progress: keyword → ordered sampled article UIDs.
///
/// A keyword present with a non-empty list is complete and is never
/// reprocessed; an empty list marks "attempted, nothing found". The map
/// grows monotonically over a run and is the sole persisted state.
/// BTreeMap keeps the serialized JSON stably ordered and diffable.
pub type CampaignResult = BTreeMap<String, Vec<String>>;
