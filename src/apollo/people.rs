// ABOUTME: People search payload, response cleaning, and result filtering.
// ABOUTME: Trims noisy fields and keeps only people who match every requested filter.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Seniorities searched when the caller names none.
pub const DEFAULT_SENIORITIES: [&str; 7] = [
    "senior", "c_suite", "vp", "director", "manager", "executive", "head",
];

const DROPPED_KEYS: [&str; 10] = [
    "breadcrumbs",
    "partial_results_only",
    "has_join",
    "disable_eu_prospecting",
    "partial_results_limit",
    "pagination",
    "contacts",
    "model_ids",
    "num_fetch_result",
    "derived_params",
];

const PERSON_FIELDS: [&str; 8] = [
    "id",
    "name",
    "email",
    "photo_url",
    "email_status",
    "organization_id",
    "intent_strength",
    "show_intent",
];

const ORGANIZATION_FIELDS: [&str; 11] = [
    "id",
    "website_url",
    "primary_phone",
    "languages",
    "alexa_ranking",
    "phone",
    "linkedin_uid",
    "founded_year",
    "publicly_traded_symbol",
    "logo_url",
    "primary_domain",
];

const HEADCOUNT_PREFIX: &str = "organization_headcount_";

const EMPLOYMENT_FIELDS: [&str; 4] = ["_id", "organization_id", "id", "key"];

/// Tool arguments for a people search. Null list entries are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PeopleSearchArgs {
    pub q_organization_keyword: Option<String>,
    pub include_similar_titles: Option<bool>,
    pub person_titles: Vec<Option<String>>,
    pub person_seniorities: Option<Vec<Option<String>>>,
    pub person_departments: Vec<Option<String>>,
    pub person_locations: Vec<Option<String>>,
    pub organization_not_locations: Vec<Option<String>>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

fn present(values: &[Option<String>]) -> Vec<String> {
    values.iter().flatten().cloned().collect()
}

impl PeopleSearchArgs {
    /// Seniorities explicitly requested, without nulls.
    pub fn requested_seniorities(&self) -> Vec<String> {
        self.person_seniorities
            .as_deref()
            .map(present)
            .unwrap_or_default()
    }
}

/// Body of `POST mixed_people/search`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeopleSearchPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q_keywords: Option<String>,
    pub include_similar_titles: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub person_titles: Vec<String>,
    pub person_seniorities: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub person_departments: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q_organization_keyword: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub person_locations: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub organization_not_locations: Vec<String>,
    pub page: u32,
    pub per_page: u32,
}

impl From<&PeopleSearchArgs> for PeopleSearchPayload {
    fn from(args: &PeopleSearchArgs) -> Self {
        let mut seniorities = args.requested_seniorities();
        if seniorities.is_empty() {
            seniorities = DEFAULT_SENIORITIES.iter().map(|s| s.to_string()).collect();
        }

        Self {
            q_keywords: args.q_organization_keyword.clone(),
            include_similar_titles: args.include_similar_titles.unwrap_or(false),
            person_titles: present(&args.person_titles),
            person_seniorities: seniorities,
            person_departments: present(&args.person_departments),
            q_organization_keyword: args.q_organization_keyword.clone(),
            person_locations: present(&args.person_locations),
            organization_not_locations: present(&args.organization_not_locations),
            page: args.page.unwrap_or(1),
            per_page: args.per_page.unwrap_or(80),
        }
    }
}

/// Drop bookkeeping keys from a response and return its cleaned people that
/// have a LinkedIn profile. The `people` key is removed from `data`.
pub fn clean_response(data: &mut Value) -> Vec<Value> {
    let Some(map) = data.as_object_mut() else {
        return Vec::new();
    };
    for key in DROPPED_KEYS {
        map.remove(key);
    }

    let people = match map.remove("people") {
        Some(Value::Array(people)) => people,
        _ => Vec::new(),
    };
    tracing::debug!(count = people.len(), "people in response");

    people
        .into_iter()
        .filter(|p| {
            p.get("linkedin_url")
                .and_then(Value::as_str)
                .is_some_and(|url| !url.is_empty())
        })
        .map(clean_person)
        .collect()
}

/// Strip identifying and noisy fields from one person record.
pub fn clean_person(mut person: Value) -> Value {
    let Some(map) = person.as_object_mut() else {
        return person;
    };
    for field in PERSON_FIELDS {
        map.remove(field);
    }

    if let Some(org) = map.get_mut("organization").and_then(Value::as_object_mut) {
        for field in ORGANIZATION_FIELDS {
            org.remove(field);
        }
        org.retain(|key, _| !key.starts_with(HEADCOUNT_PREFIX));
    }

    if let Some(jobs) = map.get_mut("employment_history").and_then(Value::as_array_mut) {
        for job in jobs.iter_mut().filter_map(Value::as_object_mut) {
            for field in EMPLOYMENT_FIELDS {
                job.remove(field);
            }
        }
    }
    person
}

fn str_field<'a>(map: Option<&'a Map<String, Value>>, key: &str) -> &'a str {
    map.and_then(|m| m.get(key))
        .and_then(Value::as_str)
        .unwrap_or_default()
}

/// Country part of a "city, region, country" location, lower-cased.
fn country(location: &str) -> String {
    let location = location.to_lowercase();
    match location.rsplit_once(',') {
        Some((_, last)) => last.trim().to_string(),
        None => location,
    }
}

/// Whether a cleaned person satisfies every filter given in `args`.
pub fn matches_all_filters(person: &Value, args: &PeopleSearchArgs) -> bool {
    let fields = person.as_object();
    let org = fields
        .and_then(|m| m.get("organization"))
        .and_then(Value::as_object);

    let seniorities = args.requested_seniorities();
    if !seniorities.is_empty() {
        let seniority = str_field(fields, "seniority").to_lowercase();
        if !seniorities
            .iter()
            .any(|s| seniority.contains(&s.to_lowercase()))
        {
            tracing::debug!(%seniority, "filtered out on seniority");
            return false;
        }
    }

    if let Some(keyword) = args.q_organization_keyword.as_deref().filter(|k| !k.is_empty()) {
        let org_name = str_field(org, "name").to_lowercase();
        if !org_name.contains(&keyword.to_lowercase()) {
            tracing::debug!(%org_name, "filtered out on organization");
            return false;
        }
    }

    let locations = present(&args.person_locations);
    if !locations.is_empty() {
        let person_country = country(str_field(fields, "location"));
        if person_country.is_empty() {
            tracing::warn!(
                linkedin_url = str_field(fields, "linkedin_url"),
                "person has no location data"
            );
            return false;
        }
        if !locations
            .iter()
            .any(|l| l.to_lowercase() == person_country)
        {
            tracing::debug!(%person_country, "filtered out on person country");
            return false;
        }
    }

    let not_locations = present(&args.organization_not_locations);
    if !not_locations.is_empty() {
        let org_country = country(str_field(org, "location"));
        if not_locations
            .iter()
            .any(|l| l.to_lowercase() == org_country)
        {
            tracing::debug!(%org_country, "filtered out on organization country");
            return false;
        }
    }

    true
}
