//! Known-answer vectors shared by the unit tests

use serde::Deserialize;
use std::vec::Vec;

#[derive(Deserialize)]
struct KnownAnswerFile {
    tests: Vec<KnownAnswer>,
}

#[derive(Clone, Deserialize)]
pub(crate) struct KnownAnswer {
    #[serde(with = "hex::serde")]
    pub(crate) pk: Vec<u8>,

    #[serde(with = "hex::serde")]
    pub(crate) message: Vec<u8>,

    #[serde(with = "hex::serde")]
    pub(crate) signature: Vec<u8>,
}

pub(crate) fn known_answers() -> Vec<KnownAnswer> {
    let file: KnownAnswerFile = serde_json::from_str(include_str!("../tests/kat.json")).unwrap();
    file.tests
}

pub(crate) fn first_known_answer() -> KnownAnswer {
    known_answers().swap_remove(0)
}
