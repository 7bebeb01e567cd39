//! End-to-end authoring session: tour progression, section gating, and
//! persistence working together the way an embedding UI drives them.

use std::fs;

use composer::draft::{
    EditorState, PortPair, Section, SectionState, TechniqueParam,
};
use composer::session::{DraftStore, FileDraftStore, SessionSnapshot};
use composer::wizard::{Advance, Direction, TourController, STEP_COUNT};
use tempfile::TempDir;

fn complete_filters(state: &mut EditorState) {
    state.query.lrs_stores.insert("lrs1".to_string());
    state.query.platforms.insert("moodle".to_string());
    state.query.activity_types.insert("course".to_string());
    state
        .query
        .activities
        .insert("course".to_string(), vec!["course-101".to_string()]);
    state.query.action_on_activities.insert("viewed".to_string());
    state.query.duration.from = Some(chrono::Utc::now());
    state.query.duration.until = Some(chrono::Utc::now());
}

fn complete_analysis(state: &mut EditorState) {
    let mut analysis = state.analysis.clone();
    analysis.technique_id = "count-per-item".to_string();
    analysis.mapping.mapping.push(PortPair {
        input_port: "items".to_string(),
        output_port: "statements".to_string(),
    });
    analysis.params.push(TechniqueParam {
        title: "top_n".to_string(),
        value: "10".to_string(),
    });
    state.set_analysis(analysis);
    // The backend ran the technique and returned a result
    state
        .analysis
        .analyzed_data
        .insert("rows".to_string(), serde_json::json!([["course-101", 17]]));
}

fn complete_visualization(state: &mut EditorState) {
    let mut vis = state.visualization.clone();
    vis.library_id = "c3".to_string();
    vis.type_id = "bar".to_string();
    vis.mapping.mapping.push(PortPair {
        input_port: "x".to_string(),
        output_port: "items".to_string(),
    });
    state.set_visualization(vis);
}

#[test]
fn test_full_authoring_session() {
    let mut state = EditorState::new();
    let mut tour = TourController::new();

    // Fresh draft: tour starts at the very first step and refuses to move
    assert_eq!(tour.start(&state), 0);
    assert!(matches!(
        tour.advance(Direction::Forward, &state),
        Advance::Blocked { step: 0, .. }
    ));

    // The user fills the filter section through the regular forms. While
    // the analysis panel is locked nothing past it is visible, so the
    // tour has nowhere to snap to.
    complete_filters(&mut state);
    assert_eq!(tour.sync(&state), None);

    // Opening the analysis panel exposes the technique step
    state.set_section(Section::Analysis, SectionState::UnlockedOpen);
    assert_eq!(tour.sync(&state), Some(6));

    complete_analysis(&mut state);
    state.set_section(Section::Visualization, SectionState::UnlockedOpen);
    assert_eq!(tour.sync(&state), Some(10));

    complete_visualization(&mut state);
    assert_eq!(tour.sync(&state), Some(13));

    state.draft.preview.display_code.push("<div id=\"ind\"/>".to_string());
    state.set_section(Section::Finalize, SectionState::UnlockedOpen);
    // The submit step has no predicate, so there is nothing left to snap to
    assert_eq!(tour.sync(&state), None);

    assert_eq!(tour.advance(Direction::Forward, &state), Advance::Moved(14));

    // Stepping forward off the submit step ends the tour
    assert_eq!(tour.advance(Direction::Forward, &state), Advance::Finished);
    assert!(!tour.is_running());
}

#[test]
fn test_backward_navigation_is_never_blocked() {
    let mut state = EditorState::new();
    complete_filters(&mut state);

    let mut tour = TourController::new();
    tour.start(&state);
    assert_eq!(tour.current_step(), 6);

    for expected in (0..6).rev() {
        assert_eq!(
            tour.advance(Direction::Backward, &state),
            Advance::Moved(expected)
        );
    }
    // And clamps at the first step
    assert_eq!(tour.advance(Direction::Backward, &state), Advance::Moved(0));
}

#[test]
fn test_editing_filters_invalidates_analysis_and_tour_position() {
    let mut state = EditorState::new();
    complete_filters(&mut state);
    state.set_section(Section::Analysis, SectionState::UnlockedOpen);
    complete_analysis(&mut state);

    let mut tour = TourController::new();
    assert_eq!(tour.start(&state), 10);

    // Changing a filter clears the cached analysis result, so the run
    // step is incomplete again and forward motion is gated on it.
    let mut query = state.query.clone();
    query.platforms.insert("ilias".to_string());
    state.set_query(query);

    assert!(state.analysis.analyzed_data.is_empty());
    assert!(matches!(
        tour.advance(Direction::Forward, &state),
        Advance::Blocked { step: 9, .. }
    ));
}

#[test]
fn test_session_survives_persistence_round_trip() {
    let dir = TempDir::new().unwrap();
    let store = FileDraftStore::new(dir.path());

    let mut state = EditorState::new();
    complete_filters(&mut state);
    state.set_section(Section::Analysis, SectionState::UnlockedOpen);
    complete_analysis(&mut state);
    state.draft.name = "Weekly course views".to_string();

    store.save(&SessionSnapshot::from(&state)).unwrap();

    // A later session rehydrates to the identical editing state, and the
    // tour resumes exactly where the data says it should.
    let restored = store
        .load()
        .unwrap()
        .expect("snapshot present")
        .into_editor_state();
    assert_eq!(restored, state);

    let mut tour = TourController::new();
    assert_eq!(tour.start(&restored), 10);
}

#[test]
fn test_corrupt_snapshot_starts_a_fresh_session() {
    let dir = TempDir::new().unwrap();
    let store = FileDraftStore::new(dir.path());

    fs::write(store.path(), "not a snapshot").unwrap();

    let state = store
        .load()
        .unwrap()
        .map(SessionSnapshot::into_editor_state)
        .unwrap_or_default();
    assert_eq!(state, EditorState::default());

    let mut tour = TourController::new();
    assert_eq!(tour.start(&state), 0);
}

#[test]
fn test_submit_clears_the_stored_session() {
    let dir = TempDir::new().unwrap();
    let store = FileDraftStore::new(dir.path());

    let mut state = EditorState::new();
    complete_filters(&mut state);
    store.save(&SessionSnapshot::from(&state)).unwrap();

    // On submit the draft is discarded along with its snapshot
    state.reset();
    store.clear().unwrap();

    assert!(store.load().unwrap().is_none());
    assert_eq!(state, EditorState::default());
}

#[test]
fn test_step_count_matches_step_table() {
    let tour = TourController::new();
    assert_eq!(tour.steps().len(), STEP_COUNT);
}
