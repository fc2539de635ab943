use chrono::NaiveDate;
use serde_json::Value;
use tripti::db::filter::Filter;
use tripti::db::*;
use tripti::model::*;
use tripti::queries::membership_queries;

fn setup() -> (rusqlite::Connection, User, Circle) {
    let conn = schema::test_connection();
    let owner = User::create("Maya".into(), "maya@example.com".into());
    user_repo::insert(&conn, &owner).unwrap();

    let circle = Circle::create("College friends".into(), None, owner.id.clone());
    circle_repo::insert(&conn, &circle).unwrap();

    (conn, owner, circle)
}

fn add_user(conn: &rusqlite::Connection, name: &str) -> User {
    let user = User::create(name.into(), String::new());
    user_repo::insert(conn, &user).unwrap();
    user
}

fn add_membership(
    conn: &rusqlite::Connection,
    user: &User,
    circle: &Circle,
    status: Option<&str>,
) -> Membership {
    let mut membership = Membership::create(user.id.clone(), circle.id.clone(), MembershipRole::Member);
    membership.status = status.map(String::from);
    membership_repo::insert(conn, &membership).unwrap();
    membership
}

// ==========================================================================
// USER / CIRCLE REPO TESTS
// ==========================================================================

#[test]
fn user_insert_and_find() {
    let (conn, owner, _) = setup();
    let found = user_repo::find_by_id(&conn, &owner.id).unwrap().unwrap();
    assert_eq!(found.name, "Maya");
    assert_eq!(found.email, "maya@example.com");
}

#[test]
fn user_find_missing_returns_none() {
    let (conn, _, _) = setup();
    assert!(user_repo::find_by_id(&conn, &Id::new("nope")).unwrap().is_none());
}

#[test]
fn circle_insert_and_find_keeps_fields() {
    let (conn, owner, circle) = setup();
    let found = circle_repo::find_by_id(&conn, &circle.id).unwrap().unwrap();
    assert_eq!(found.name, "College friends");
    assert_eq!(found.owner_id, owner.id);
    assert_eq!(found.created_at, circle.created_at);
}

#[test]
fn legacy_ids_are_stored_verbatim() {
    let conn = schema::test_connection();
    let mut user = User::create("Old".into(), String::new());
    user.id = Id::new("5f2b9c1e8d3a");
    user_repo::insert(&conn, &user).unwrap();

    let found = user_repo::find_by_id(&conn, &Id::new("5f2b9c1e8d3a")).unwrap();
    assert!(found.is_some());
}

// ==========================================================================
// MEMBERSHIP REPO / FILTER TESTS
// ==========================================================================

#[test]
fn membership_with_no_status_roundtrips_as_none() {
    let (conn, _, circle) = setup();
    let legacy = add_user(&conn, "Legacy");
    add_membership(&conn, &legacy, &circle, None);

    let found = membership_repo::find(&conn, &legacy.id, &circle.id).unwrap().unwrap();
    assert_eq!(found.status, None);
    assert!(found.is_active());
}

#[test]
fn active_filter_selects_exactly_non_left_rows() {
    let (conn, _, circle) = setup();
    let legacy = add_user(&conn, "Legacy");
    let active = add_user(&conn, "Active");
    let invited = add_user(&conn, "Invited");
    let departed = add_user(&conn, "Departed");
    let rows = vec![
        add_membership(&conn, &legacy, &circle, None),
        add_membership(&conn, &active, &circle, Some("active")),
        add_membership(&conn, &invited, &circle, Some("invited")),
        add_membership(&conn, &departed, &circle, Some("left")),
    ];

    let filter = membership_queries::active_memberships_filter().eq("circle_id", circle.id.as_str());
    let mut selected: Vec<String> = membership_repo::find_matching(&conn, &filter)
        .unwrap()
        .into_iter()
        .map(|m| m.user_id.value)
        .collect();
    selected.sort();

    let mut expected: Vec<String> = rows
        .iter()
        .filter(|m| m.is_active())
        .map(|m| m.user_id.value.clone())
        .collect();
    expected.sort();

    assert_eq!(selected.len(), 3);
    assert_eq!(selected, expected);
}

#[test]
fn sql_and_document_evaluation_agree() {
    let (conn, _, circle) = setup();
    let statuses = [None, Some("active"), Some("invited"), Some("left")];
    let mut rows = Vec::new();
    for (i, status) in statuses.iter().enumerate() {
        let user = add_user(&conn, &format!("User {}", i));
        rows.push(add_membership(&conn, &user, &circle, *status));
    }

    for row in &rows {
        let filter =
            membership_queries::active_membership_query(row.user_id.as_str(), circle.id.as_str());

        let in_db = !membership_repo::find_matching(&conn, &filter).unwrap().is_empty();

        let with_null = serde_json::to_value(row).unwrap();
        let mut without_key = with_null.clone();
        if row.status.is_none() {
            if let Value::Object(map) = &mut without_key {
                map.remove("status");
            }
        }

        assert_eq!(in_db, row.is_active(), "status {:?}", row.status);
        assert_eq!(filter.matches(&with_null), in_db, "status {:?}", row.status);
        assert_eq!(filter.matches(&without_key), in_db, "status {:?}", row.status);
    }
}

#[test]
fn plain_inequality_would_drop_legacy_rows() {
    let (conn, _, circle) = setup();
    let legacy = add_user(&conn, "Legacy");
    add_membership(&conn, &legacy, &circle, None);

    let naive: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM circle_memberships WHERE status != 'left'",
            [],
            |row| row.get(0),
        )
        .unwrap();
    let filter = membership_queries::active_memberships_filter();

    assert_eq!(naive, 0);
    assert_eq!(membership_repo::count_matching(&conn, &filter).unwrap(), 1);
}

#[test]
fn count_matching_with_empty_filter_counts_everything() {
    let (conn, _, circle) = setup();
    let a = add_user(&conn, "A");
    let b = add_user(&conn, "B");
    add_membership(&conn, &a, &circle, None);
    add_membership(&conn, &b, &circle, Some("left"));

    assert_eq!(membership_repo::count_matching(&conn, &Filter::new()).unwrap(), 2);
}

#[test]
fn membership_update_changes_status() {
    let (conn, _, circle) = setup();
    let user = add_user(&conn, "Sam");
    let mut membership = add_membership(&conn, &user, &circle, Some("active"));

    membership.status = Some("left".into());
    membership_repo::update(&conn, &membership).unwrap();

    let found = membership_repo::find(&conn, &user.id, &circle.id).unwrap().unwrap();
    assert!(!found.is_active());
}

// ==========================================================================
// TRIP / NUDGE REPO TESTS
// ==========================================================================

#[test]
fn trip_insert_update_and_find() {
    let (conn, owner, circle) = setup();
    let mut trip = Trip::create(circle.id.clone(), owner.id.clone(), "Lisbon".into());
    trip_repo::insert(&conn, &trip).unwrap();

    trip.status = TripStatus::Locked;
    trip.start_date = NaiveDate::from_ymd_opt(2025, 9, 12);
    trip.end_date = NaiveDate::from_ymd_opt(2025, 9, 15);
    trip_repo::update(&conn, &trip).unwrap();

    let found = trip_repo::find_by_id(&conn, &trip.id).unwrap().unwrap();
    assert_eq!(found.status, TripStatus::Locked);
    assert_eq!(found.start_date, trip.start_date);
    assert_eq!(found.end_date, trip.end_date);

    let by_circle = trip_repo::find_by_circle(&conn, &circle.id).unwrap();
    assert_eq!(by_circle.len(), 1);
}

#[test]
fn nudge_pending_are_oldest_first() {
    let (conn, owner, circle) = setup();
    let trip = Trip::create(circle.id.clone(), owner.id.clone(), "Lisbon".into());
    trip_repo::insert(&conn, &trip).unwrap();

    let first = Nudge::create(trip.id.clone(), owner.id.clone(), "vote_on_dates".into());
    let second = Nudge::create(trip.id.clone(), owner.id.clone(), "dates_locked".into());
    nudge_repo::insert(&conn, &first).unwrap();
    nudge_repo::insert(&conn, &second).unwrap();

    let pending = nudge_repo::find_pending(&conn).unwrap();
    assert_eq!(pending.len(), 2);
    assert_eq!(pending[0].id, first.id);
}

#[test]
fn nudge_for_recipient_hides_dismissed_unless_asked() {
    let (conn, owner, circle) = setup();
    let trip = Trip::create(circle.id.clone(), owner.id.clone(), "Lisbon".into());
    trip_repo::insert(&conn, &trip).unwrap();

    let mut nudge = Nudge::create(trip.id.clone(), owner.id.clone(), "dates_locked".into());
    nudge.dismissed = true;
    nudge_repo::insert(&conn, &nudge).unwrap();

    assert!(nudge_repo::find_for_recipient(&conn, &owner.id, false).unwrap().is_empty());
    assert_eq!(nudge_repo::find_for_recipient(&conn, &owner.id, true).unwrap().len(), 1);
}

#[test]
fn aggregate_upsert_replaces_row() {
    let conn = schema::test_connection();
    let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
    let mut aggregate = DailyAggregate {
        date,
        active_memberships: 3,
        left_memberships: 1,
        trips_created: 1,
        nudges_created: 4,
        nudges_pushed: 2,
    };
    aggregate_repo::upsert(&conn, &aggregate).unwrap();

    aggregate.nudges_pushed = 3;
    aggregate_repo::upsert(&conn, &aggregate).unwrap();

    let found = aggregate_repo::find_by_date(&conn, date).unwrap().unwrap();
    assert_eq!(found, aggregate);
    assert_eq!(aggregate_repo::find_recent(&conn, 10).unwrap().len(), 1);
}
