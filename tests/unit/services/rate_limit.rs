//! Unit tests for the shared rate budget

use std::time::Duration;

use sigmex::services::rate_limit::RateBudget;

#[tokio::test(start_paused = true)]
async fn budget_caps_a_rolling_window() {
    let budget = RateBudget::new(20, Duration::from_secs(2));

    for _ in 0..20 {
        assert!(budget.try_acquire().await.is_ok());
    }

    let retry_after = budget.try_acquire().await.unwrap_err();
    assert!(retry_after > Duration::ZERO);
    assert!(retry_after <= Duration::from_secs(2));
}

#[tokio::test(start_paused = true)]
async fn budget_replenishes_after_the_window() {
    let budget = RateBudget::new(5, Duration::from_secs(2));
    for _ in 0..5 {
        assert!(budget.try_acquire().await.is_ok());
    }
    assert!(budget.try_acquire().await.is_err());

    tokio::time::advance(Duration::from_secs(2)).await;
    assert!(budget.try_acquire().await.is_ok());
}

#[tokio::test(start_paused = true)]
async fn acquire_within_waits_for_a_slot() {
    let budget = RateBudget::new(3, Duration::from_secs(2));
    for _ in 0..3 {
        assert!(budget.try_acquire().await.is_ok());
    }

    let start = tokio::time::Instant::now();
    budget
        .acquire_within(Duration::from_secs(5))
        .await
        .expect("slot frees inside the bound");
    assert!(start.elapsed() >= Duration::from_secs(2));
    assert!(start.elapsed() <= Duration::from_secs(3));
}

#[tokio::test(start_paused = true)]
async fn acquire_within_rejects_with_backoff_hint() {
    let budget = RateBudget::new(1, Duration::from_secs(2));
    assert!(budget.try_acquire().await.is_ok());

    let retry_after = budget
        .acquire_within(Duration::from_secs(1))
        .await
        .unwrap_err();
    assert!(retry_after > Duration::from_secs(1));
    assert!(retry_after <= Duration::from_secs(2));
}
