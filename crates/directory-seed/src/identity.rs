//! Sources of personal identity data for generated users.
//!
//! The user generator never calls a fake-data library directly; it pulls
//! names and phone numbers through [`IdentitySource`]. [`FakeIdentitySource`]
//! is the production implementation and [`ScriptedIdentities`] replays a
//! fixed list, which keeps user tests deterministic.

use std::collections::VecDeque;

use fake::Fake;
use fake::faker::name::en::{FirstName, LastName};
use fake::faker::phone_number::en::PhoneNumber;
use rand::Rng;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("Identity source exhausted after {0} identities")]
    Exhausted(usize),
    #[error("Malformed name: first='{first}' last='{last}'")]
    MalformedName { first: String, last: String },
}

/// Raw personal fields drawn for one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonalIdentity {
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
}

impl PersonalIdentity {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        phone_number: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            phone_number: phone_number.into(),
        }
    }
}

/// Provides one identity per call.
pub trait IdentitySource {
    fn next_identity(&mut self) -> Result<PersonalIdentity, IdentityError>;
}

/// Identity source backed by the `fake` crate.
///
/// Pass a seeded RNG for reproducible names.
pub struct FakeIdentitySource<R: Rng> {
    rng: R,
}

impl<R: Rng> FakeIdentitySource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> IdentitySource for FakeIdentitySource<R> {
    fn next_identity(&mut self) -> Result<PersonalIdentity, IdentityError> {
        let first_name: String = FirstName().fake_with_rng(&mut self.rng);
        let last_name: String = LastName().fake_with_rng(&mut self.rng);
        let phone_number: String = PhoneNumber().fake_with_rng(&mut self.rng);

        Ok(PersonalIdentity {
            first_name,
            last_name,
            phone_number,
        })
    }
}

/// Replays a fixed list of identities, failing once it runs out.
#[derive(Debug, Default)]
pub struct ScriptedIdentities {
    queue: VecDeque<PersonalIdentity>,
    served: usize,
}

impl ScriptedIdentities {
    pub fn new(identities: impl IntoIterator<Item = PersonalIdentity>) -> Self {
        Self {
            queue: identities.into_iter().collect(),
            served: 0,
        }
    }

    /// Number of identities not yet served.
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl IdentitySource for ScriptedIdentities {
    fn next_identity(&mut self) -> Result<PersonalIdentity, IdentityError> {
        let identity = self
            .queue
            .pop_front()
            .ok_or(IdentityError::Exhausted(self.served))?;
        self.served += 1;
        Ok(identity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_fake_source_produces_names() {
        let mut source = FakeIdentitySource::new(StdRng::seed_from_u64(7));
        for _ in 0..20 {
            let identity = source.next_identity().unwrap();
            assert!(!identity.first_name.is_empty());
            assert!(!identity.last_name.is_empty());
            assert!(!identity.phone_number.is_empty());
        }
    }

    #[test]
    fn test_fake_source_is_reproducible() {
        let mut a = FakeIdentitySource::new(StdRng::seed_from_u64(99));
        let mut b = FakeIdentitySource::new(StdRng::seed_from_u64(99));
        for _ in 0..5 {
            assert_eq!(a.next_identity().unwrap(), b.next_identity().unwrap());
        }
    }

    #[test]
    fn test_scripted_exhaustion() {
        let mut source = ScriptedIdentities::new([PersonalIdentity::new(
            "Ada",
            "Lovelace",
            "555-0100",
        )]);

        assert_eq!(source.remaining(), 1);
        assert_eq!(source.next_identity().unwrap().last_name, "Lovelace");
        assert!(matches!(
            source.next_identity(),
            Err(IdentityError::Exhausted(1))
        ));
    }
}
