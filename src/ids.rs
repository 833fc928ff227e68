//! Short human-readable identifiers: `DOC1234`, `WRK5678`, `APT123456`.
//!
//! Candidates are random. Uniqueness is checked up front with `exists`, but
//! the store's primary-key constraint is the real guarantee: an insert that
//! reports `Conflict` is retried with a fresh candidate. Both paths share a
//! single attempt budget.

use rand::Rng;

use crate::db::DatabaseError;

/// Attempts per identifier before giving up with `IdSpaceExhausted`.
pub const MAX_ID_ATTEMPTS: u32 = 32;

/// Prefix plus a fixed count of decimal digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdScheme {
    pub prefix: &'static str,
    pub digits: u32,
}

pub const DOCTOR_ID: IdScheme = IdScheme { prefix: "DOC", digits: 4 };
pub const WORKER_ID: IdScheme = IdScheme { prefix: "WRK", digits: 4 };
pub const APPOINTMENT_CODE: IdScheme = IdScheme { prefix: "APT", digits: 6 };

impl IdScheme {
    /// Draw one candidate. The numeric part never has a leading zero, so it
    /// is always exactly `digits` long.
    pub fn candidate<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        let low = 10u64.pow(self.digits - 1);
        let high = 10u64.pow(self.digits) - 1;
        format!("{}{}", self.prefix, rng.gen_range(low..=high))
    }

    /// Whether `code` has this scheme's shape.
    pub fn matches(&self, code: &str) -> bool {
        code.strip_prefix(self.prefix).is_some_and(|rest| {
            rest.len() == self.digits as usize
                && rest.bytes().all(|b| b.is_ascii_digit())
                && !rest.starts_with('0')
        })
    }

    /// Number of distinct codes this scheme can issue.
    pub fn capacity(&self) -> u64 {
        9 * 10u64.pow(self.digits - 1)
    }
}

/// Draw candidates until `exists` reports a free one. Check-only form of
/// [`create_with_unique_id`], for callers that insert elsewhere.
pub fn generate_unique_id<R, E>(
    scheme: &IdScheme,
    rng: &mut R,
    mut exists: E,
) -> Result<String, DatabaseError>
where
    R: Rng + ?Sized,
    E: FnMut(&str) -> Result<bool, DatabaseError>,
{
    for _ in 0..MAX_ID_ATTEMPTS {
        if let Some(candidate) = free_candidate(scheme, rng, &mut exists)? {
            return Ok(candidate);
        }
    }
    Err(exhausted(scheme))
}

/// Generate a code and persist with it, retrying when the insert loses a
/// race for the same code.
///
/// `insert` receives the candidate and must report a duplicate key as
/// `DatabaseError::Conflict`. Any other error is returned unchanged.
pub fn create_with_unique_id<T, R, E, I>(
    scheme: &IdScheme,
    rng: &mut R,
    mut exists: E,
    mut insert: I,
) -> Result<T, DatabaseError>
where
    R: Rng + ?Sized,
    E: FnMut(&str) -> Result<bool, DatabaseError>,
    I: FnMut(&str) -> Result<T, DatabaseError>,
{
    for attempt in 1..=MAX_ID_ATTEMPTS {
        let Some(candidate) = free_candidate(scheme, rng, &mut exists)? else {
            continue;
        };
        match insert(&candidate) {
            Ok(created) => return Ok(created),
            Err(DatabaseError::Conflict { .. }) => {
                tracing::warn!(
                    prefix = scheme.prefix,
                    attempt,
                    "Identifier taken at insert time, retrying"
                );
            }
            Err(e) => return Err(e),
        }
    }
    Err(exhausted(scheme))
}

/// One draw: the candidate if `exists` reports it free, `None` if taken.
fn free_candidate<R, E>(
    scheme: &IdScheme,
    rng: &mut R,
    exists: &mut E,
) -> Result<Option<String>, DatabaseError>
where
    R: Rng + ?Sized,
    E: FnMut(&str) -> Result<bool, DatabaseError>,
{
    let candidate = scheme.candidate(rng);
    Ok((!exists(&candidate)?).then_some(candidate))
}

fn exhausted(scheme: &IdScheme) -> DatabaseError {
    tracing::error!(
        prefix = scheme.prefix,
        attempts = MAX_ID_ATTEMPTS,
        capacity = scheme.capacity(),
        "Identifier space exhausted"
    );
    DatabaseError::IdSpaceExhausted {
        prefix: scheme.prefix.to_string(),
        attempts: MAX_ID_ATTEMPTS,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn candidates_have_prefix_and_exact_digit_count() {
        let mut rng = rng();
        for scheme in [DOCTOR_ID, WORKER_ID, APPOINTMENT_CODE] {
            for _ in 0..500 {
                let code = scheme.candidate(&mut rng);
                assert!(scheme.matches(&code), "{code} does not match {scheme:?}");
            }
        }
    }

    #[test]
    fn matches_rejects_malformed_codes() {
        assert!(DOCTOR_ID.matches("DOC1000"));
        assert!(!DOCTOR_ID.matches("DOC0999"));
        assert!(!DOCTOR_ID.matches("DOC12345"));
        assert!(!DOCTOR_ID.matches("WRK1234"));
        assert!(!APPOINTMENT_CODE.matches("APT12a456"));
    }

    #[test]
    fn capacity_counts_codes_without_leading_zero() {
        assert_eq!(DOCTOR_ID.capacity(), 9000);
        assert_eq!(APPOINTMENT_CODE.capacity(), 900_000);
    }

    #[test]
    fn generate_skips_taken_candidates() {
        let mut rng = rng();
        let mut calls = 0;
        let code = generate_unique_id(&DOCTOR_ID, &mut rng, |_| {
            calls += 1;
            Ok(calls < 4)
        })
        .unwrap();
        assert_eq!(calls, 4);
        assert!(DOCTOR_ID.matches(&code));
    }

    #[test]
    fn generate_gives_up_after_budget() {
        let mut rng = rng();
        let mut calls = 0;
        let err = generate_unique_id(&WORKER_ID, &mut rng, |_| {
            calls += 1;
            Ok(true)
        })
        .unwrap_err();
        assert_eq!(calls, MAX_ID_ATTEMPTS);
        assert!(matches!(
            err,
            DatabaseError::IdSpaceExhausted { ref prefix, attempts } if prefix == "WRK" && attempts == MAX_ID_ATTEMPTS
        ));
    }

    #[test]
    fn generate_propagates_lookup_errors() {
        let mut rng = rng();
        let err = generate_unique_id(&DOCTOR_ID, &mut rng, |_| {
            Err(DatabaseError::ConstraintViolation("boom".into()))
        })
        .unwrap_err();
        assert!(matches!(err, DatabaseError::ConstraintViolation(_)));
    }

    #[test]
    fn free_candidate_reports_taken_as_none() {
        let mut rng = rng();
        let mut taken = |_: &str| -> Result<bool, DatabaseError> { Ok(true) };
        let mut free = |_: &str| -> Result<bool, DatabaseError> { Ok(false) };

        assert_eq!(free_candidate(&WORKER_ID, &mut rng, &mut taken).unwrap(), None);
        let code = free_candidate(&WORKER_ID, &mut rng, &mut free).unwrap();
        assert!(code.is_some_and(|c| WORKER_ID.matches(&c)));
    }

    #[test]
    fn create_spends_budget_on_taken_candidates_without_inserting() {
        let mut rng = rng();
        let mut lookups = 0;
        let mut inserts = 0;
        let err = create_with_unique_id(
            &DOCTOR_ID,
            &mut rng,
            |_| {
                lookups += 1;
                Ok(true)
            },
            |_| -> Result<(), DatabaseError> {
                inserts += 1;
                Ok(())
            },
        )
        .unwrap_err();
        assert_eq!(lookups, MAX_ID_ATTEMPTS);
        assert_eq!(inserts, 0);
        assert!(matches!(err, DatabaseError::IdSpaceExhausted { .. }));
    }

    #[test]
    fn create_retries_when_insert_reports_conflict() {
        let mut rng = rng();
        let mut inserts = Vec::new();
        let created = create_with_unique_id(
            &APPOINTMENT_CODE,
            &mut rng,
            |_| Ok(false),
            |code| {
                inserts.push(code.to_string());
                if inserts.len() < 3 {
                    Err(DatabaseError::Conflict {
                        entity_type: "appointment".into(),
                        key: code.into(),
                    })
                } else {
                    Ok(code.to_string())
                }
            },
        )
        .unwrap();
        assert_eq!(inserts.len(), 3);
        assert_eq!(inserts.last(), Some(&created));
    }

    #[test]
    fn create_does_not_retry_other_errors() {
        let mut rng = rng();
        let mut inserts = 0;
        let err = create_with_unique_id(
            &DOCTOR_ID,
            &mut rng,
            |_| Ok(false),
            |_| -> Result<(), DatabaseError> {
                inserts += 1;
                Err(DatabaseError::ConstraintViolation("check".into()))
            },
        )
        .unwrap_err();
        assert_eq!(inserts, 1);
        assert!(matches!(err, DatabaseError::ConstraintViolation(_)));
    }

    #[test]
    fn create_never_reissues_a_taken_code() {
        let mut rng = rng();
        let mut issued: HashSet<String> = HashSet::new();
        for _ in 0..200 {
            let code = create_with_unique_id(
                &DOCTOR_ID,
                &mut rng,
                |c| Ok(issued.contains(c)),
                |c| Ok(c.to_string()),
            )
            .unwrap();
            assert!(issued.insert(code));
        }
    }
}
