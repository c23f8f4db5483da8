//! Proptest generators and property suites for the ledger.

use proptest::prelude::*;

use cpd_ledger::{Category, CourseHash, IssueRequest, Principal, SignatureBlob};
use cpd_ledger_core::MAX_CREDITS;

/// Generate a random principal.
pub fn principal() -> impl Strategy<Value = Principal> {
    any::<[u8; 32]>().prop_map(Principal::from_bytes)
}

/// Generate a random course hash.
pub fn course_hash() -> impl Strategy<Value = CourseHash> {
    any::<[u8; 32]>().prop_map(CourseHash::from_bytes)
}

/// Generate a random signature blob.
pub fn signature_blob() -> impl Strategy<Value = SignatureBlob> {
    any::<[u8; 65]>().prop_map(SignatureBlob::from_bytes)
}

/// Generate a category.
pub fn category() -> impl Strategy<Value = Category> {
    prop_oneof![
        Just(Category::Ethics),
        Just(Category::Technical),
        Just(Category::Management),
    ]
}

/// Generate a credit amount within the global bounds.
pub fn credits() -> impl Strategy<Value = u64> {
    1u64..=MAX_CREDITS
}

/// Generate a valid description.
pub fn description() -> impl Strategy<Value = String> {
    "[A-Za-z0-9 ]{1,64}".prop_map(String::from)
}

/// Generate a valid location (possibly empty).
pub fn location() -> impl Strategy<Value = String> {
    "[A-Za-z ]{0,32}".prop_map(String::from)
}

/// Parameters for generating a well-formed issue request.
#[derive(Debug, Clone)]
pub struct IssueParams {
    pub professional: Principal,
    pub course_hash: CourseHash,
    pub credits: u64,
    pub description: String,
    pub category: Category,
    pub expiration: u64,
    pub location: String,
    pub signature: SignatureBlob,
}

impl Arbitrary for IssueParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (
            principal(),
            course_hash(),
            1u64..=50u64,
            description(),
            category(),
            1u64..=1_000_000u64, // expiration offset above the clock
            location(),
            signature_blob(),
        )
            .prop_map(
                |(professional, hash, credits, description, category, expiration, location, sig)| {
                    IssueParams {
                        professional,
                        course_hash: hash,
                        credits,
                        description,
                        category,
                        expiration,
                        location,
                        signature: sig,
                    }
                },
            )
            .boxed()
    }
}

/// Build an issue request from generated parameters.
pub fn request_from_params(params: &IssueParams) -> IssueRequest {
    IssueRequest {
        professional: params.professional,
        course_hash: params.course_hash.as_bytes().to_vec(),
        credits: params.credits,
        description: params.description.clone(),
        category: params.category.as_str().to_string(),
        expiration: params.expiration,
        location: params.location.clone(),
        signature: params.signature.as_bytes().to_vec(),
    }
}
