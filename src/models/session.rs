// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! The annotation session.
//!
//! A `Session` owns everything one labeling activity works on: the ordered
//! image sequence, the sample list, the label assignment and the navigation
//! position. The UI holds a session and calls into it in response to user
//! actions, then re-renders from it.
//!
//! Every operation that reads from disk parses completely before touching
//! `self`, so a failed load leaves the session unchanged.

use super::sample::{FramePoint, LabelDecision, Sample};
use super::state::SessionState;
use crate::error::SessionError;
use crate::io::{coordinates, media, serialization};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

/// Default half-width of the click hit box, in image pixels.
pub const DEFAULT_HIT_RADIUS: f64 = 5.0;

/// Result of clicking on a frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// No sample inside the hit box
    Missed,
    /// Hit a first-frame sample, which is never relabeled
    FirstFrame { sample: usize },
    /// Hit a sample that should be labeled; `choices` are the existing labels
    NeedsLabel { sample: usize, choices: Vec<u32> },
}

/// Complete in-memory state of a labeling session.
#[derive(Debug, Clone)]
pub struct Session {
    image_folder: Option<PathBuf>,
    coordinate_file: Option<PathBuf>,
    images: Vec<PathBuf>,
    samples: Vec<Sample>,
    labels: BTreeMap<usize, u32>,
    next_label: u32,
    labeled_frames: BTreeSet<usize>,
    current_frame: usize,
    hit_radius: f64,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Create an empty session.
    pub fn new() -> Self {
        Self::with_hit_radius(DEFAULT_HIT_RADIUS)
    }

    /// Create an empty session with a custom hit box half-width.
    pub fn with_hit_radius(hit_radius: f64) -> Self {
        Self {
            image_folder: None,
            coordinate_file: None,
            images: Vec::new(),
            samples: Vec::new(),
            labels: BTreeMap::new(),
            next_label: 1,
            labeled_frames: BTreeSet::new(),
            current_frame: 0,
            hit_radius,
        }
    }

    pub fn images(&self) -> &[PathBuf] {
        &self.images
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn labels(&self) -> &BTreeMap<usize, u32> {
        &self.labels
    }

    pub fn label_of(&self, sample: usize) -> Option<u32> {
        self.labels.get(&sample).copied()
    }

    pub fn next_label(&self) -> u32 {
        self.next_label
    }

    pub fn current_frame(&self) -> usize {
        self.current_frame
    }

    pub fn image_folder(&self) -> Option<&Path> {
        self.image_folder.as_deref()
    }

    pub fn coordinate_file(&self) -> Option<&Path> {
        self.coordinate_file.as_deref()
    }

    /// Frames that have had at least one label assigned, ascending.
    pub fn labeled_frames(&self) -> Vec<usize> {
        self.labeled_frames.iter().copied().collect()
    }

    /// Load the image sequence from a folder and return to the first frame.
    pub fn load_images(&mut self, folder: &Path) -> Result<usize, SessionError> {
        let images = media::list_images(folder)?;

        self.image_folder = Some(folder.to_path_buf());
        self.images = images;
        self.current_frame = 0;

        log::info!("Loaded {} images from {}", self.images.len(), folder.display());
        Ok(self.images.len())
    }

    /// Load samples from a coordinate CSV, replacing the previous samples and
    /// labels, then auto-label the first frame.
    pub fn load_coordinates(&mut self, path: &Path) -> Result<usize, SessionError> {
        let samples = coordinates::read_coordinates(path)?;

        self.coordinate_file = Some(path.to_path_buf());
        self.samples = samples;
        self.labels.clear();
        self.labeled_frames.clear();
        self.auto_label_first_frame();

        log::info!(
            "Loaded {} coordinate points from {}",
            self.samples.len(),
            path.display()
        );
        Ok(self.samples.len())
    }

    /// Give every frame-0 sample a distinct label `1..=k` in list order.
    pub fn auto_label_first_frame(&mut self) {
        let first_frame = self
            .samples
            .iter()
            .enumerate()
            .filter(|(_, sample)| sample.frame == 0)
            .map(|(index, _)| index);

        for (label, index) in (1..).zip(first_frame) {
            self.labels.insert(index, label);
        }

        self.next_label = self.max_label() + 1;
        self.labeled_frames.insert(0);
    }

    fn max_label(&self) -> u32 {
        self.labels.values().copied().max().unwrap_or(0)
    }

    /// The adjacent frames shown side by side as `(left, right)`.
    pub fn frame_pair(&self) -> (Option<usize>, Option<usize>) {
        let frame = |index: usize| (index < self.images.len()).then_some(index);
        (frame(self.current_frame), frame(self.current_frame + 1))
    }

    /// Advance to the next frame. Returns false when already on the last one.
    pub fn advance(&mut self) -> bool {
        if self.current_frame + 1 < self.images.len() {
            self.current_frame += 1;
            true
        } else {
            log::debug!("No more images to display");
            false
        }
    }

    /// Find the first sample on `frame` whose hit box contains `(x, y)`.
    pub fn hit_test(&self, frame: usize, x: f64, y: f64) -> Option<usize> {
        self.samples
            .iter()
            .position(|sample| sample.frame == frame && sample.within(x, y, self.hit_radius))
    }

    /// Distinct labels currently in use, ascending.
    pub fn label_choices(&self) -> Vec<u32> {
        self.labels
            .values()
            .copied()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Work out what a click at `(x, y)` on `frame` should do.
    pub fn click(&self, frame: usize, x: f64, y: f64) -> ClickOutcome {
        match self.hit_test(frame, x, y) {
            None => ClickOutcome::Missed,
            Some(sample) if frame == 0 => ClickOutcome::FirstFrame { sample },
            Some(sample) => ClickOutcome::NeedsLabel {
                sample,
                choices: self.label_choices(),
            },
        }
    }

    /// Apply the user's label decision to a sample.
    ///
    /// Returns the label that was assigned, or `None` if nothing changed.
    /// First-frame samples are left alone.
    pub fn apply_label(&mut self, sample: usize, decision: LabelDecision) -> Option<u32> {
        let frame = self.samples.get(sample)?.frame;
        if frame == 0 {
            return None;
        }

        let label = match decision {
            LabelDecision::Cancelled => return None,
            LabelDecision::UseExisting(label) => label,
            LabelDecision::CreateNew => {
                let label = self.max_label() + 1;
                self.next_label = label + 1;
                label
            }
        };

        self.labels.insert(sample, label);
        self.labeled_frames.insert(frame);
        log::info!("Labeled sample {} on frame {} as {}", sample, frame, label);
        Some(label)
    }

    /// Click at `(x, y)` on `frame` and, if a labelable sample was hit, ask
    /// `prompt` for a decision given the existing labels.
    pub fn label_point<F>(&mut self, frame: usize, x: f64, y: f64, prompt: F) -> Option<u32>
    where
        F: FnOnce(&[u32]) -> LabelDecision,
    {
        match self.click(frame, x, y) {
            ClickOutcome::Missed => {
                log::debug!("Click at ({:.1}, {:.1}) on frame {} hit nothing", x, y, frame);
                None
            }
            ClickOutcome::FirstFrame { sample } => {
                log::debug!("Sample {} is on the first frame and keeps its label", sample);
                None
            }
            ClickOutcome::NeedsLabel { sample, choices } => {
                let decision = prompt(&choices);
                self.apply_label(sample, decision)
            }
        }
    }

    /// Samples on `frame` with their labels, in list order.
    pub fn points_in_frame(&self, frame: usize) -> Vec<FramePoint> {
        self.samples
            .iter()
            .enumerate()
            .filter(|(_, sample)| sample.frame == frame)
            .map(|(index, sample)| FramePoint {
                index,
                x: sample.x,
                y: sample.y,
                label: self.label_of(index),
            })
            .collect()
    }

    /// Write every sample and its label to a labeled CSV.
    pub fn export_labels(&self, path: &Path) -> Result<(), SessionError> {
        coordinates::write_labels(path, &self.samples, &self.labels)?;
        log::info!("Saved labeled coordinates to {}", path.display());
        Ok(())
    }

    /// Snapshot the session into its serializable form.
    pub fn to_state(&self) -> Result<SessionState, SessionError> {
        let image_folder = self
            .image_folder
            .as_ref()
            .ok_or(SessionError::Incomplete { missing: "image folder" })?;
        let coordinate_file = self
            .coordinate_file
            .as_ref()
            .ok_or(SessionError::Incomplete { missing: "coordinate file" })?;

        Ok(SessionState {
            image_folder: image_folder.to_string_lossy().into_owned(),
            coordinate_file: coordinate_file.to_string_lossy().into_owned(),
            current_image_index: self.current_frame,
            labels: self.labels.clone(),
            next_label: self.next_label,
            labeled_images: self.labeled_frames(),
        })
    }

    /// Save the session state to a JSON file.
    pub fn save_state(&self, path: &Path) -> Result<(), SessionError> {
        let state = self.to_state()?;
        serialization::export_state(&state, path)?;
        log::info!("Saved current state to {}", path.display());
        Ok(())
    }

    /// Restore a session from a JSON state file.
    ///
    /// The images and samples are reloaded from the paths recorded in the
    /// state; the labeling progress comes from the state itself.
    pub fn load_state(&mut self, path: &Path) -> Result<(), SessionError> {
        let state = serialization::import_state(path)?;

        let folder = PathBuf::from(&state.image_folder);
        if !folder.is_dir() {
            return Err(SessionError::MissingPath { path: folder });
        }
        let coordinate_file = PathBuf::from(&state.coordinate_file);
        if !coordinate_file.is_file() {
            return Err(SessionError::MissingPath {
                path: coordinate_file,
            });
        }

        let images = media::list_images(&folder)?;
        let samples = coordinates::read_coordinates(&coordinate_file)?;

        if let Some((&index, _)) = state.labels.range(samples.len()..).next() {
            return Err(SessionError::InvalidState {
                message: format!(
                    "label for sample {} but only {} samples loaded",
                    index,
                    samples.len()
                ),
            });
        }
        if state.current_image_index > 0 && state.current_image_index >= images.len() {
            return Err(SessionError::InvalidState {
                message: format!(
                    "current image {} but only {} images loaded",
                    state.current_image_index,
                    images.len()
                ),
            });
        }

        self.image_folder = Some(folder);
        self.coordinate_file = Some(coordinate_file);
        self.images = images;
        self.samples = samples;
        self.labels = state.labels;
        self.next_label = state.next_label;
        self.labeled_frames = state.labeled_images.into_iter().collect();
        self.current_frame = state.current_image_index;

        log::info!(
            "Loaded state from {} ({} images, {} points, {} labels)",
            path.display(),
            self.images.len(),
            self.samples.len(),
            self.labels.len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;

    /// Session with samples set directly, auto-labeled like a coordinate load.
    fn session_with(samples: &[(usize, f64, f64)], image_count: usize) -> Session {
        let mut session = Session::new();
        session.samples = samples
            .iter()
            .map(|&(frame, x, y)| Sample::new(frame, x, y))
            .collect();
        session.images = (0..image_count)
            .map(|i| PathBuf::from(format!("frame{i}.png")))
            .collect();
        session.auto_label_first_frame();
        session
    }

    fn example_session() -> Session {
        session_with(&[(0, 10.0, 10.0), (0, 50.0, 50.0), (1, 12.0, 11.0)], 2)
    }

    /// Write an image folder and coordinate CSV to disk.
    fn write_inputs(dir: &Path, coords: &str, image_count: usize) -> (PathBuf, PathBuf) {
        let folder = dir.join("frames");
        std::fs::create_dir(&folder).unwrap();
        for i in 0..image_count {
            File::create(folder.join(format!("frame_{i}.png"))).unwrap();
        }
        let csv = dir.join("coords.csv");
        std::fs::write(&csv, coords).unwrap();
        (folder, csv)
    }

    #[test]
    fn test_auto_label_first_frame_in_list_order() {
        let session = session_with(
            &[(1, 0.0, 0.0), (0, 5.0, 5.0), (2, 1.0, 1.0), (0, 9.0, 9.0), (0, 3.0, 3.0)],
            3,
        );

        assert_eq!(session.label_of(1), Some(1));
        assert_eq!(session.label_of(3), Some(2));
        assert_eq!(session.label_of(4), Some(3));
        assert_eq!(session.labels().len(), 3);
        assert_eq!(session.next_label(), 4);
        assert_eq!(session.labeled_frames(), vec![0]);
    }

    #[test]
    fn test_auto_label_without_first_frame_samples() {
        let session = session_with(&[(1, 0.0, 0.0), (2, 1.0, 1.0)], 3);

        assert!(session.labels().is_empty());
        assert_eq!(session.next_label(), 1);
        assert_eq!(session.labeled_frames(), vec![0]);
    }

    #[test]
    fn test_end_to_end_example() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let (folder, csv) = write_inputs(temp.path(), "frame,x,y\n0,10,10\n0,50,50\n1,12,11\n", 2);

        let mut session = Session::new();
        session.load_images(&folder).unwrap();
        session.load_coordinates(&csv).unwrap();

        assert_eq!(session.label_of(0), Some(1));
        assert_eq!(session.label_of(1), Some(2));
        assert_eq!(session.next_label(), 3);
        assert_eq!(session.labeled_frames(), vec![0]);

        let assigned = session.label_point(1, 12.0, 11.0, |choices| {
            assert_eq!(choices, &[1, 2]);
            LabelDecision::CreateNew
        });
        assert_eq!(assigned, Some(3));
        assert_eq!(session.label_of(2), Some(3));
        assert_eq!(session.next_label(), 4);
        assert_eq!(session.labeled_frames(), vec![0, 1]);

        let out = temp.path().join("labeled.csv");
        session.export_labels(&out).unwrap();
        assert_eq!(
            std::fs::read_to_string(&out).unwrap(),
            "Frame,X,Y,Label\n0,10,10,1\n0,50,50,2\n1,12,11,3\n"
        );
    }

    #[test]
    fn test_hit_test_first_match_wins() {
        let session = session_with(
            &[(1, 100.0, 100.0), (1, 20.0, 20.0), (1, 22.0, 21.0), (2, 20.0, 20.0)],
            3,
        );

        assert_eq!(session.hit_test(1, 21.0, 20.5), Some(1));
        assert_eq!(session.hit_test(1, 25.5, 21.0), Some(2));
        assert_eq!(session.hit_test(2, 21.0, 20.5), Some(3));
        assert_eq!(session.hit_test(1, 60.0, 60.0), None);
        assert_eq!(session.hit_test(3, 20.0, 20.0), None);
    }

    #[test]
    fn test_click_outcomes() {
        let session = example_session();

        assert_eq!(session.click(1, 40.0, 40.0), ClickOutcome::Missed);
        assert_eq!(session.click(0, 11.0, 9.0), ClickOutcome::FirstFrame { sample: 0 });
        assert_eq!(
            session.click(1, 12.0, 11.0),
            ClickOutcome::NeedsLabel {
                sample: 2,
                choices: vec![1, 2]
            }
        );
    }

    #[test]
    fn test_first_frame_click_never_relabels() {
        let mut session = example_session();
        let before = session.labels().clone();

        let assigned = session.label_point(0, 50.0, 50.0, |_| panic!("no prompt for first frame"));
        assert_eq!(assigned, None);
        assert_eq!(session.apply_label(1, LabelDecision::UseExisting(9)), None);
        assert_eq!(session.labels(), &before);
    }

    #[test]
    fn test_missed_click_changes_nothing() {
        let mut session = example_session();
        let before = session.labels().clone();

        let assigned = session.label_point(1, 30.0, 30.0, |_| panic!("no prompt on a miss"));
        assert_eq!(assigned, None);
        assert_eq!(session.labels(), &before);
        assert_eq!(session.labeled_frames(), vec![0]);
    }

    #[test]
    fn test_cancel_changes_nothing() {
        let mut session = example_session();

        let assigned = session.label_point(1, 12.0, 11.0, |_| LabelDecision::Cancelled);
        assert_eq!(assigned, None);
        assert_eq!(session.label_of(2), None);
        assert_eq!(session.next_label(), 3);
        assert_eq!(session.labeled_frames(), vec![0]);
    }

    #[test]
    fn test_reuse_existing_label_allows_duplicates() {
        let mut session = session_with(&[(0, 10.0, 10.0), (1, 10.0, 10.0), (2, 10.0, 10.0)], 3);

        assert_eq!(session.label_point(1, 10.0, 10.0, |_| LabelDecision::UseExisting(1)), Some(1));
        assert_eq!(session.label_point(2, 10.0, 10.0, |_| LabelDecision::UseExisting(1)), Some(1));
        assert_eq!(session.label_of(1), Some(1));
        assert_eq!(session.label_of(2), Some(1));
        assert_eq!(session.label_choices(), vec![1]);
        assert_eq!(session.next_label(), 2);
        assert_eq!(session.labeled_frames(), vec![0, 1, 2]);
    }

    #[test]
    fn test_new_labels_are_one_past_max() {
        let mut session = session_with(
            &[(0, 0.0, 0.0), (1, 10.0, 10.0), (1, 30.0, 30.0), (2, 10.0, 10.0), (2, 30.0, 30.0)],
            3,
        );

        // Manually assign a large label first; the next new label follows it
        assert_eq!(session.apply_label(1, LabelDecision::UseExisting(7)), Some(7));
        assert_eq!(session.next_label(), 2);

        for (sample, expected) in [(2, 8), (3, 9), (4, 10)] {
            let max_before = session.labels().values().copied().max().unwrap();
            let assigned = session.apply_label(sample, LabelDecision::CreateNew);
            assert_eq!(assigned, Some(max_before + 1));
            assert_eq!(assigned, Some(expected));
            assert_eq!(session.next_label(), expected + 1);
        }
    }

    #[test]
    fn test_relabeling_replaces_previous_label() {
        let mut session = example_session();

        session.apply_label(2, LabelDecision::UseExisting(2));
        session.apply_label(2, LabelDecision::UseExisting(1));
        assert_eq!(session.label_of(2), Some(1));
        assert_eq!(session.labels().len(), 3);
    }

    #[test]
    fn test_frame_pair_and_advance() {
        let mut session = session_with(&[], 3);

        assert_eq!(session.frame_pair(), (Some(0), Some(1)));
        assert!(session.advance());
        assert_eq!(session.frame_pair(), (Some(1), Some(2)));
        assert!(session.advance());
        assert_eq!(session.frame_pair(), (Some(2), None));

        assert!(!session.advance());
        assert_eq!(session.current_frame(), 2);
    }

    #[test]
    fn test_advance_without_images() {
        let mut session = Session::new();

        assert_eq!(session.frame_pair(), (None, None));
        assert!(!session.advance());
        assert_eq!(session.current_frame(), 0);
    }

    #[test]
    fn test_points_in_frame() {
        let mut session = example_session();
        session.samples.push(Sample::new(1, 70.0, 80.0));

        assert_eq!(
            session.points_in_frame(1),
            vec![
                FramePoint { index: 2, x: 12.0, y: 11.0, label: None },
                FramePoint { index: 3, x: 70.0, y: 80.0, label: None },
            ]
        );

        session.apply_label(3, LabelDecision::CreateNew);
        let labels: Vec<_> = session.points_in_frame(1).iter().map(|p| p.label).collect();
        assert_eq!(labels, vec![None, Some(3)]);
        assert!(session.points_in_frame(5).is_empty());
    }

    #[test]
    fn test_load_images_resets_current_frame() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let (folder, _) = write_inputs(temp.path(), "frame,x,y\n", 3);

        let mut session = Session::new();
        session.load_images(&folder).unwrap();
        session.advance();
        assert_eq!(session.current_frame(), 1);

        assert_eq!(session.load_images(&folder).unwrap(), 3);
        assert_eq!(session.current_frame(), 0);
    }

    #[test]
    fn test_reload_coordinates_replaces_labels() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let (folder, csv) = write_inputs(temp.path(), "frame,x,y\n0,10,10\n1,12,11\n", 2);

        let mut session = Session::new();
        session.load_images(&folder).unwrap();
        session.load_coordinates(&csv).unwrap();
        session.apply_label(1, LabelDecision::CreateNew);
        assert_eq!(session.labeled_frames(), vec![0, 1]);

        std::fs::write(&csv, "frame,x,y\n1,5,5\n0,1,1\n0,2,2\n").unwrap();
        assert_eq!(session.load_coordinates(&csv).unwrap(), 3);

        assert_eq!(session.labels(), &BTreeMap::from([(1, 1), (2, 2)]));
        assert_eq!(session.next_label(), 3);
        assert_eq!(session.labeled_frames(), vec![0]);
    }

    #[test]
    fn test_failed_coordinate_load_keeps_session() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let (_, csv) = write_inputs(temp.path(), "frame,x,y\n0,10,10\n", 1);
        let bad = temp.path().join("bad.csv");
        std::fs::write(&bad, "frame,x,y\n0,1,1\n1,oops,2\n").unwrap();

        let mut session = Session::new();
        session.load_coordinates(&csv).unwrap();

        assert!(session.load_coordinates(&bad).is_err());
        assert_eq!(session.samples(), &[Sample::new(0, 10.0, 10.0)]);
        assert_eq!(session.coordinate_file(), Some(csv.as_path()));
        assert_eq!(session.label_of(0), Some(1));
    }

    #[test]
    fn test_failed_image_load_keeps_session() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let (folder, _) = write_inputs(temp.path(), "frame,x,y\n", 2);
        let bad = temp.path().join("bad");
        std::fs::create_dir(&bad).unwrap();
        File::create(bad.join("cover.png")).unwrap();

        let mut session = Session::new();
        session.load_images(&folder).unwrap();
        session.advance();

        assert!(session.load_images(&bad).is_err());
        assert_eq!(session.images().len(), 2);
        assert_eq!(session.current_frame(), 1);
        assert_eq!(session.image_folder(), Some(folder.as_path()));
    }

    #[test]
    fn test_state_round_trip() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let (folder, csv) = write_inputs(
            temp.path(),
            "frame,x,y\n0,10,10\n0,50,50\n1,12,11\n1,52,50\n2,13,12\n",
            3,
        );

        let mut session = Session::new();
        session.load_images(&folder).unwrap();
        session.load_coordinates(&csv).unwrap();
        session.label_point(1, 52.0, 50.0, |_| LabelDecision::UseExisting(2));
        session.label_point(1, 12.0, 11.0, |_| LabelDecision::CreateNew);
        session.advance();
        session.label_point(2, 13.0, 12.0, |_| LabelDecision::UseExisting(3));

        let state_path = temp.path().join("state.json");
        session.save_state(&state_path).unwrap();

        let mut restored = Session::new();
        restored.load_state(&state_path).unwrap();

        assert_eq!(restored.labels(), session.labels());
        assert_eq!(restored.labeled_frames(), session.labeled_frames());
        assert_eq!(restored.next_label(), session.next_label());
        assert_eq!(restored.current_frame(), 1);
        assert_eq!(restored.samples(), session.samples());
        assert_eq!(restored.images(), session.images());
        assert_eq!(restored.to_state().unwrap(), session.to_state().unwrap());
    }

    #[test]
    fn test_save_state_requires_sources() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let err = Session::new()
            .save_state(&temp.path().join("state.json"))
            .unwrap_err();
        assert!(matches!(err, SessionError::Incomplete { .. }));
    }

    #[test]
    fn test_load_state_missing_path_is_fatal() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let (folder, csv) = write_inputs(temp.path(), "frame,x,y\n0,10,10\n", 1);

        let mut session = Session::new();
        session.load_images(&folder).unwrap();
        session.load_coordinates(&csv).unwrap();
        let state_path = temp.path().join("state.json");
        session.save_state(&state_path).unwrap();

        std::fs::remove_file(&csv).unwrap();
        let mut restored = Session::new();
        let err = restored.load_state(&state_path).unwrap_err();
        assert!(matches!(err, SessionError::MissingPath { .. }));
        assert!(restored.samples().is_empty());
        assert!(restored.image_folder().is_none());
    }

    #[test]
    fn test_load_state_rejects_out_of_range_labels() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let (folder, csv) = write_inputs(temp.path(), "frame,x,y\n0,10,10\n", 1);
        let state = SessionState {
            image_folder: folder.to_string_lossy().into_owned(),
            coordinate_file: csv.to_string_lossy().into_owned(),
            current_image_index: 0,
            labels: BTreeMap::from([(0, 1), (5, 2)]),
            next_label: 3,
            labeled_images: vec![0],
        };
        let state_path = temp.path().join("state.json");
        serialization::export_state(&state, &state_path).unwrap();

        let err = Session::new().load_state(&state_path).unwrap_err();
        assert!(matches!(err, SessionError::InvalidState { .. }));
    }

    #[test]
    fn test_load_state_rejects_out_of_range_frame() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let (folder, csv) = write_inputs(temp.path(), "frame,x,y\n0,10,10\n", 2);
        let state = SessionState {
            image_folder: folder.to_string_lossy().into_owned(),
            coordinate_file: csv.to_string_lossy().into_owned(),
            current_image_index: 2,
            labels: BTreeMap::new(),
            next_label: 1,
            labeled_images: vec![],
        };
        let state_path = temp.path().join("state.json");
        serialization::export_state(&state, &state_path).unwrap();

        let err = Session::new().load_state(&state_path).unwrap_err();
        assert!(matches!(err, SessionError::InvalidState { .. }));
    }

    #[test]
    fn test_rejected_state_keeps_populated_session() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let (folder, csv) = write_inputs(temp.path(), "frame,x,y\n0,10,10\n1,12,11\n", 2);

        let mut session = Session::new();
        session.load_images(&folder).unwrap();
        session.load_coordinates(&csv).unwrap();
        session.label_point(1, 12.0, 11.0, |_| LabelDecision::CreateNew);
        session.advance();
        let before = session.to_state().unwrap();

        let state = SessionState {
            labels: BTreeMap::from([(0, 1), (9, 4)]),
            ..before.clone()
        };
        let state_path = temp.path().join("state.json");
        serialization::export_state(&state, &state_path).unwrap();

        let err = session.load_state(&state_path).unwrap_err();
        assert!(matches!(err, SessionError::InvalidState { .. }));
        assert_eq!(session.to_state().unwrap(), before);
        assert_eq!(session.samples().len(), 2);
        assert_eq!(session.images().len(), 2);
    }

    #[test]
    fn test_load_state_labeled_frames_unordered_with_duplicates() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let (folder, csv) = write_inputs(temp.path(), "frame,x,y\n0,10,10\n2,5,5\n1,7,7\n", 3);
        let state = SessionState {
            image_folder: folder.to_string_lossy().into_owned(),
            coordinate_file: csv.to_string_lossy().into_owned(),
            current_image_index: 1,
            labels: BTreeMap::from([(0, 1), (1, 2), (2, 2)]),
            next_label: 3,
            labeled_images: vec![2, 0, 2, 1, 0],
        };
        let state_path = temp.path().join("state.json");
        serialization::export_state(&state, &state_path).unwrap();

        let mut session = Session::new();
        session.load_state(&state_path).unwrap();

        assert_eq!(session.labeled_frames(), vec![0, 1, 2]);
        assert_eq!(session.to_state().unwrap().labeled_images, vec![0, 1, 2]);
        assert_eq!(session.current_frame(), 1);
    }

    #[test]
    fn test_custom_hit_radius() {
        let mut session = Session::with_hit_radius(10.0);
        session.samples = vec![Sample::new(1, 10.0, 10.0)];

        assert_eq!(session.hit_test(1, 18.0, 2.5), Some(0));
        assert_eq!(session.hit_test(1, 20.0, 10.0), None);
    }
}
