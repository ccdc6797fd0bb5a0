//! End-to-end storefront scenarios against the in-memory backend

use std::sync::Arc;

use jiff::{SignedDuration, Timestamp};
use serde_json::Value;
use skillorbit::{
    backend::{Collection, MemoryBackend},
    catalog::CatalogStore,
    clock::ManualClock,
    courses::{Course, CourseId},
    render::render_course_grid,
    storefront::Storefront,
    users::UserId,
};
use testresult::TestResult;

fn storefront() -> (Arc<MemoryBackend>, Arc<ManualClock>, Storefront) {
    let backend = Arc::new(MemoryBackend::new());
    let clock = Arc::new(ManualClock::new(Timestamp::UNIX_EPOCH));
    let storefront = Storefront::new(backend.clone(), backend.clone()).with_clock(clock.clone());

    (backend, clock, storefront)
}

/// Seed the sample catalog, each course one day newer than the last.
fn seed_sample_catalog(backend: &MemoryBackend) -> TestResult<Vec<Course>> {
    let catalog = CatalogStore::sample()?;
    let mut created_at = Timestamp::UNIX_EPOCH;

    for course in catalog.iter() {
        created_at = created_at + SignedDuration::from_hours(24);

        let mut course = course.clone();
        course.created_at = Some(created_at);

        let Value::Object(mut document) = serde_json::to_value(&course)? else {
            return Err("course did not serialize to an object".into());
        };
        document.remove("id");

        backend.seed(Collection::Courses, course.id.as_str(), document);
    }

    Ok(catalog.as_slice().to_vec())
}

fn enrolled_courses(backend: &MemoryBackend, user_id: &UserId) -> Vec<Value> {
    backend
        .documents(Collection::Users)
        .into_iter()
        .find(|snapshot| snapshot.id == user_id.as_str())
        .and_then(|snapshot| snapshot.data.get("enrolledCourses").cloned())
        .and_then(|value| match value {
            Value::Array(values) => Some(values),
            _ => None,
        })
        .unwrap_or_default()
}

#[tokio::test]
async fn enrolling_twice_keeps_one_entry_and_two_orders() -> TestResult {
    let (backend, clock, storefront) = storefront();
    seed_sample_catalog(&backend)?;

    let user = storefront
        .sign_up("ana@example.com", "hunter22", "Ana")
        .await
        .into_result()?;
    let user_id = user.uid.clone();
    let course_id = CourseId::from(3_u64);

    assert!(storefront.enroll(&user_id, &course_id).await.is_success());
    clock.advance(SignedDuration::from_mins(5));
    assert!(storefront.enroll(&user_id, &course_id).await.is_success());

    assert_eq!(
        enrolled_courses(&backend, &user_id),
        vec![Value::String("3".to_string())]
    );

    let orders = backend.documents(Collection::Orders);
    assert_eq!(orders.len(), 2);
    assert!(orders.iter().all(|order| {
        order.data.get("courseId") == Some(&Value::String("3".to_string()))
            && order.data.get("status") == Some(&Value::String("completed".to_string()))
    }));

    let titles: Vec<String> = storefront
        .get_user_courses(&user_id)
        .await
        .into_iter()
        .map(|course| course.title)
        .collect();
    assert_eq!(titles, ["Python Programming for Beginners"]);

    Ok(())
}

#[tokio::test]
async fn catalog_loads_newest_first_and_renders_in_order() -> TestResult {
    let (backend, _clock, storefront) = storefront();
    let seeded = seed_sample_catalog(&backend)?;

    let courses = storefront.get_courses().await;
    let ids: Vec<&str> = courses.iter().map(|course| course.id.as_str()).collect();
    assert_eq!(ids, ["6", "5", "4", "3", "2", "1"]);
    assert_eq!(courses.len(), seeded.len());

    let grid = render_course_grid(&courses);
    assert_eq!(grid.matches(r#"<div class="course-card""#).count(), 6);
    assert!(grid.contains("1,499"));
    assert!(grid.contains(r#"<span class="course-badge">Hot</span>"#));

    let newest = grid.find("Mobile App Development with React Native");
    let python = grid.find("Python Programming for Beginners");
    assert!(newest.is_some() && newest < python);

    Ok(())
}

#[tokio::test]
async fn absent_records_are_not_failures() {
    let (backend, _clock, storefront) = storefront();
    let unknown = UserId::from("nobody");

    assert_eq!(storefront.get_course(&CourseId::from("missing")).await, None);
    assert!(!storefront.is_admin(&unknown).await);
    assert_eq!(storefront.get_user(&unknown).await, None);
    assert!(storefront.get_user_courses(&unknown).await.is_empty());
    assert!(backend.documents(Collection::Orders).is_empty());
}

#[tokio::test]
async fn outage_fails_closed_and_recovers() -> TestResult {
    let (backend, _clock, storefront) = storefront();
    seed_sample_catalog(&backend)?;

    backend.set_outage(Some("Network error"));

    assert!(storefront.get_courses().await.is_empty());
    assert_eq!(
        storefront
            .sign_in("ana@example.com", "hunter22")
            .await
            .error(),
        Some("Network error")
    );

    backend.set_outage(None);

    assert_eq!(storefront.get_courses().await.len(), 6);

    Ok(())
}

#[tokio::test]
async fn password_reset_and_sign_out_round_trip_the_session() -> TestResult {
    let (backend, _clock, storefront) = storefront();

    storefront
        .sign_up("ana@example.com", "hunter22", "Ana")
        .await
        .into_result()?;
    assert!(storefront.current_user().is_some());

    storefront.sign_out().await.into_result()?;
    assert_eq!(storefront.current_user(), None);
    assert_eq!(backend.current_user(), None);

    let signed_in = storefront
        .sign_in("ana@example.com", "hunter22")
        .await
        .into_result()?;
    assert_eq!(signed_in.display_name.as_deref(), Some("Ana"));

    storefront
        .send_password_reset("ana@example.com")
        .await
        .into_result()?;
    assert_eq!(backend.password_resets(), ["ana@example.com"]);

    Ok(())
}
