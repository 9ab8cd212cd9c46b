use futures::future::join_all;
use paywall::{
    models::common::{MembershipTier, PackageTier},
    services::{eligibility::is_available, pricing::derive_original_price},
};

/// The pure cores share nothing, so concurrent callers see the same answers
#[tokio::test]
async fn concurrent_callers_get_identical_results() {
    let handles = (0..32).map(|_| {
        tokio::spawn(async {
            let availability: Vec<bool> = MembershipTier::ALL
                .iter()
                .map(|current| is_available(PackageTier::Phantom, *current))
                .collect();
            let price = derive_original_price("9,99 €", 0.5);
            (availability, price)
        })
    });

    let results: Vec<_> = join_all(handles)
        .await
        .into_iter()
        .map(|r| r.unwrap())
        .collect();

    let expected = (
        vec![true, true, true, true, false, false],
        Some("19.98€".to_string()),
    );
    assert!(results.iter().all(|r| *r == expected));
}
