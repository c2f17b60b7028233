use crate::{
    models::{
        Challenge, Hype, NewChallenge, NewHype, NewSubmission, NewUser, Submission,
        SubmissionDraft, User,
    },
    seed,
};
use chrono::Utc;
use dashmap::{DashMap, mapref::entry::Entry};
use rand::Rng;
use thiserror::Error;
use tracing::warn;
use uuid::Uuid;

/// Points credited to a submission's author for every hype it receives.
pub const HYPE_POINTS: u64 = 10;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("user {user_id} has already hyped submission {submission_id}")]
    DuplicateHype { submission_id: Uuid, user_id: Uuid },

    #[error("username already taken: {0}")]
    UsernameTaken(String),

    #[error("user not found: {0}")]
    UserNotFound(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;

// ============================================================================
// ENGAGEMENT STORE - Users, challenges, submissions and hypes
// ============================================================================
/// In-memory holder of every entity the service knows about.
///
/// Each collection is a `DashMap`, so a single call is atomic with respect to
/// the entry it touches. The two uniqueness rules (username, and one hype per
/// submission/voter pair) are enforced through the `entry` API on an index
/// map, which keeps the check and the insert under the same shard lock.
///
/// Lock order: an index map may be held while an entity map is locked, never
/// the other way round.
#[derive(Default)]
pub struct EngagementStore {
    users: DashMap<Uuid, User>,
    username_index: DashMap<String, Uuid>,
    challenges: DashMap<Uuid, Challenge>,
    submissions: DashMap<Uuid, Submission>,
    // Submission ids per challenge, in insertion order
    challenge_submissions: DashMap<Uuid, Vec<Uuid>>,
    hypes: DashMap<Uuid, Hype>,
    // (submission_id, user_id) -> hype id
    hype_index: DashMap<(Uuid, Uuid), Uuid>,
}

impl EngagementStore {
    /// Empty store with no challenges.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with the challenge catalog, each entry given a
    /// random participant count in `0..50`.
    pub fn seeded() -> Self {
        Self::seeded_with(&mut rand::rng())
    }

    pub fn seeded_with<R: Rng>(rng: &mut R) -> Self {
        let store = Self::new();
        for entry in seed::CATALOG.iter() {
            let count = rng.random_range(0..seed::MAX_SEED_PARTICIPANTS);
            store.insert_challenge(entry.to_new_challenge(), count);
        }
        store
    }

    // ------------------------------------------------------------------------
    // Users
    // ------------------------------------------------------------------------

    pub fn get_user(&self, id: &Uuid) -> Option<User> {
        self.users.get(id).map(|user| user.clone())
    }

    pub fn get_user_by_username(&self, username: &str) -> Option<User> {
        let id = self.username_index.get(username).map(|entry| *entry.value())?;
        self.get_user(&id)
    }

    /// Insert a new user with zero hype points.
    ///
    /// Fails with [`StoreError::UsernameTaken`] when the username is already
    /// bound; use [`EngagementStore::bootstrap_identity`] for get-or-create.
    pub fn create_user(&self, data: NewUser) -> Result<User> {
        match self.username_index.entry(data.username.clone()) {
            Entry::Occupied(_) => Err(StoreError::UsernameTaken(data.username)),
            Entry::Vacant(slot) => {
                let user = Self::build_user(data);
                self.users.insert(user.id, user.clone());
                slot.insert(user.id);
                Ok(user)
            }
        }
    }

    /// Get-or-create by username as one atomic step. The flag is `true` when
    /// a new user was created.
    pub fn bootstrap_identity(&self, data: NewUser) -> (User, bool) {
        match self.username_index.entry(data.username.clone()) {
            Entry::Occupied(mut slot) => {
                if let Some(user) = self.users.get(slot.get()) {
                    return (user.clone(), false);
                }
                // Index entry with no record behind it; rebind the name.
                let user = Self::build_user(data);
                self.users.insert(user.id, user.clone());
                slot.insert(user.id);
                (user, true)
            }
            Entry::Vacant(slot) => {
                let user = Self::build_user(data);
                self.users.insert(user.id, user.clone());
                slot.insert(user.id);
                (user, true)
            }
        }
    }

    /// Adds `delta` to the user's hype points. Returns `false` (and changes
    /// nothing) when the user does not exist.
    pub fn update_user_hype_points(&self, user_id: &Uuid, delta: u64) -> bool {
        match self.users.get_mut(user_id) {
            Some(mut user) => {
                user.total_hype_points = user.total_hype_points.saturating_add(delta);
                true
            }
            None => false,
        }
    }

    /// Every user, in no particular order.
    pub fn get_all_users(&self) -> Vec<User> {
        self.users.iter().map(|entry| entry.value().clone()).collect()
    }

    /// Users ranked by hype points, highest first. Ties are broken by
    /// username so the ranking is stable between calls.
    pub fn get_leaderboard(&self) -> Vec<User> {
        let mut users = self.get_all_users();
        users.sort_by(|a, b| {
            b.total_hype_points
                .cmp(&a.total_hype_points)
                .then_with(|| a.username.cmp(&b.username))
        });
        users
    }

    fn build_user(data: NewUser) -> User {
        User {
            id: Uuid::new_v4(),
            username: data.username,
            state: data.state,
            platoon: data.platoon,
            total_hype_points: 0,
        }
    }

    // ------------------------------------------------------------------------
    // Challenges
    // ------------------------------------------------------------------------

    /// Challenges ordered by participant count, most popular first.
    pub fn get_all_challenges(&self) -> Vec<Challenge> {
        let mut challenges: Vec<Challenge> = self
            .challenges
            .iter()
            .map(|entry| entry.value().clone())
            .collect();

        challenges.sort_by(|a, b| {
            b.participant_count
                .cmp(&a.participant_count)
                .then_with(|| a.created_at.cmp(&b.created_at))
        });
        challenges
    }

    pub fn get_challenge(&self, id: &Uuid) -> Option<Challenge> {
        self.challenges.get(id).map(|challenge| challenge.clone())
    }

    pub fn create_challenge(&self, data: NewChallenge) -> Challenge {
        self.insert_challenge(data, 0)
    }

    /// Returns `false` when the challenge does not exist.
    pub fn increment_challenge_participants(&self, id: &Uuid) -> bool {
        match self.challenges.get_mut(id) {
            Some(mut challenge) => {
                challenge.participant_count += 1;
                true
            }
            None => false,
        }
    }

    fn insert_challenge(&self, data: NewChallenge, participant_count: u64) -> Challenge {
        let challenge = Challenge {
            id: Uuid::new_v4(),
            title: data.title,
            description: data.description,
            emoji: data.emoji,
            participant_count,
            created_at: Utc::now(),
        };
        self.challenges.insert(challenge.id, challenge.clone());
        challenge
    }

    // ------------------------------------------------------------------------
    // Submissions
    // ------------------------------------------------------------------------

    /// Submissions ordered newest first.
    pub fn get_all_submissions(&self) -> Vec<Submission> {
        let mut submissions: Vec<Submission> = self
            .submissions
            .iter()
            .map(|entry| entry.value().clone())
            .collect();

        submissions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        submissions
    }

    pub fn get_submission(&self, id: &Uuid) -> Option<Submission> {
        self.submissions.get(id).map(|submission| submission.clone())
    }

    /// Submissions entered into one challenge, in the order they were made.
    pub fn get_submissions_by_challenge(&self, challenge_id: &Uuid) -> Vec<Submission> {
        let ids = match self.challenge_submissions.get(challenge_id) {
            Some(ids) => ids.value().clone(),
            None => return Vec::new(),
        };

        ids.iter().filter_map(|id| self.get_submission(id)).collect()
    }

    /// Stores a submission with a zero hype count. References to the
    /// challenge and user are not checked.
    pub fn create_submission(&self, data: NewSubmission) -> Submission {
        let submission = Submission {
            id: Uuid::new_v4(),
            challenge_id: data.challenge_id,
            user_id: data.user_id,
            username: data.username,
            state: data.state,
            platoon: data.platoon,
            caption: data.caption,
            media_type: data.media_type,
            media_url: data.media_url,
            hype_count: 0,
            created_at: Utc::now(),
        };

        self.submissions.insert(submission.id, submission.clone());
        self.challenge_submissions
            .entry(submission.challenge_id)
            .or_default()
            .push(submission.id);

        submission
    }

    /// Returns `false` when the submission does not exist.
    pub fn increment_submission_hype(&self, id: &Uuid) -> bool {
        match self.submissions.get_mut(id) {
            Some(mut submission) => {
                submission.hype_count += 1;
                true
            }
            None => false,
        }
    }

    /// Creates a submission on behalf of `username`, snapshotting the
    /// author's profile onto it, and counts it towards the challenge.
    pub fn submit(&self, username: &str, draft: SubmissionDraft) -> Result<Submission> {
        let author = self
            .get_user_by_username(username)
            .ok_or_else(|| StoreError::UserNotFound(username.to_string()))?;

        let submission = self.create_submission(NewSubmission {
            challenge_id: draft.challenge_id,
            user_id: author.id,
            username: author.username,
            state: author.state,
            platoon: author.platoon,
            caption: draft.caption,
            media_type: draft.media_type,
            media_url: draft.media_url,
        });

        if !self.increment_challenge_participants(&submission.challenge_id) {
            warn!(
                "Submission {} references unknown challenge {}",
                submission.id, submission.challenge_id
            );
        }

        Ok(submission)
    }

    // ------------------------------------------------------------------------
    // Hypes
    // ------------------------------------------------------------------------

    /// Records a hype, failing with [`StoreError::DuplicateHype`] if the same
    /// user already hyped the same submission.
    pub fn create_hype(&self, data: NewHype) -> Result<Hype> {
        match self.hype_index.entry((data.submission_id, data.user_id)) {
            Entry::Occupied(_) => Err(StoreError::DuplicateHype {
                submission_id: data.submission_id,
                user_id: data.user_id,
            }),
            Entry::Vacant(slot) => {
                let hype = Hype {
                    id: Uuid::new_v4(),
                    submission_id: data.submission_id,
                    user_id: data.user_id,
                    created_at: Utc::now(),
                };
                self.hypes.insert(hype.id, hype.clone());
                slot.insert(hype.id);
                Ok(hype)
            }
        }
    }

    pub fn has_user_hyped(&self, submission_id: &Uuid, user_id: &Uuid) -> bool {
        self.hype_index.contains_key(&(*submission_id, *user_id))
    }

    #[cfg(test)]
    fn hype_total(&self) -> usize {
        self.hypes.len()
    }

    /// Hypes a submission as `voter_id`: records the hype, bumps the
    /// submission's count and credits [`HYPE_POINTS`] to its author.
    pub fn award_hype(&self, submission_id: Uuid, voter_id: Uuid) -> Result<Hype> {
        if !self.users.contains_key(&voter_id) {
            return Err(StoreError::UserNotFound(voter_id.to_string()));
        }

        let hype = self.create_hype(NewHype {
            submission_id,
            user_id: voter_id,
        })?;

        if !self.increment_submission_hype(&submission_id) {
            warn!("Hype {} references unknown submission {}", hype.id, submission_id);
            return Ok(hype);
        }

        let author_id = self.submissions.get(&submission_id).map(|s| s.user_id);
        if let Some(author_id) = author_id {
            if !self.update_user_hype_points(&author_id, HYPE_POINTS) {
                warn!("Author {} of submission {} not found", author_id, submission_id);
            }
        }

        Ok(hype)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MediaType;
    use rand::{SeedableRng, rngs::StdRng};

    fn new_user(username: &str) -> NewUser {
        NewUser {
            username: username.to_string(),
            state: "Lagos".to_string(),
            platoon: "3".to_string(),
        }
    }

    fn draft(challenge_id: Uuid) -> SubmissionDraft {
        SubmissionDraft {
            challenge_id,
            caption: "Left, right, left!".to_string(),
            media_type: MediaType::Video,
            media_url: "https://cdn.example.com/march.mp4".to_string(),
        }
    }

    fn challenge(store: &EngagementStore) -> Challenge {
        store.create_challenge(NewChallenge {
            title: "Best Parade March".to_string(),
            description: "Show us your sharpest parade march!".to_string(),
            emoji: "🎖️".to_string(),
        })
    }

    #[test]
    fn created_users_are_found_by_username() {
        let store = EngagementStore::new();
        let names = ["ada", "bola", "Chidi", "chidi"];
        for name in names {
            store.create_user(new_user(name)).unwrap();
        }

        assert_eq!(store.get_all_users().len(), names.len());
        for name in names {
            let user = store.get_user_by_username(name).unwrap();
            assert_eq!(user.username, name);
            assert_eq!(user.total_hype_points, 0);
            assert_eq!(store.get_user(&user.id).unwrap().username, name);
        }
    }

    #[test]
    fn create_user_rejects_taken_username() {
        let store = EngagementStore::new();
        store.create_user(new_user("ada")).unwrap();

        let err = store.create_user(new_user("ada")).unwrap_err();
        assert!(matches!(err, StoreError::UsernameTaken(name) if name == "ada"));
        assert_eq!(store.get_all_users().len(), 1);
    }

    #[test]
    fn bootstrap_identity_reuses_existing_user() {
        let store = EngagementStore::new();
        let (first, created) = store.bootstrap_identity(new_user("ada"));
        assert!(created);

        let (second, created) = store.bootstrap_identity(NewUser {
            username: "ada".to_string(),
            state: "Kano".to_string(),
            platoon: "7".to_string(),
        });
        assert!(!created);
        assert_eq!(first.id, second.id);
        assert_eq!(second.state, "Lagos");
        assert_eq!(store.get_all_users().len(), 1);
    }

    #[test]
    fn bootstrap_identity_is_atomic_across_threads() {
        let store = std::sync::Arc::new(EngagementStore::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = store.clone();
                std::thread::spawn(move || store.bootstrap_identity(new_user("ada")).1)
            })
            .collect();

        let created = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|created| *created)
            .count();

        assert_eq!(created, 1);
        assert_eq!(store.get_all_users().len(), 1);
    }

    #[test]
    fn update_hype_points_on_missing_user_is_noop() {
        let store = EngagementStore::new();
        let user = store.create_user(new_user("ada")).unwrap();

        assert!(!store.update_user_hype_points(&Uuid::new_v4(), 10));
        assert!(store.update_user_hype_points(&user.id, 30));
        assert_eq!(store.get_user(&user.id).unwrap().total_hype_points, 30);
    }

    #[test]
    fn challenges_are_ordered_by_participants() {
        let mut rng = StdRng::seed_from_u64(7);
        let store = EngagementStore::seeded_with(&mut rng);

        let challenges = store.get_all_challenges();
        assert_eq!(challenges.len(), seed::CATALOG.len());
        assert!(
            challenges
                .windows(2)
                .all(|w| w[0].participant_count >= w[1].participant_count)
        );
        assert!(
            challenges
                .iter()
                .all(|c| c.participant_count < seed::MAX_SEED_PARTICIPANTS)
        );
    }

    #[test]
    fn new_challenge_starts_empty() {
        let store = EngagementStore::new();
        let created = challenge(&store);

        assert_eq!(created.participant_count, 0);
        assert_eq!(store.get_challenge(&created.id).unwrap().title, created.title);
        assert!(store.get_challenge(&Uuid::new_v4()).is_none());
    }

    #[test]
    fn submit_increments_participants_by_one() {
        let store = EngagementStore::new();
        let target = challenge(&store);
        store.create_user(new_user("ada")).unwrap();
        store.increment_challenge_participants(&target.id);
        let before = store.get_challenge(&target.id).unwrap().participant_count;

        let submission = store.submit("ada", draft(target.id)).unwrap();

        assert_eq!(submission.hype_count, 0);
        assert_eq!(submission.username, "ada");
        assert_eq!(submission.state, "Lagos");
        assert_eq!(
            store.get_challenge(&target.id).unwrap().participant_count,
            before + 1
        );
    }

    #[test]
    fn submit_requires_known_user() {
        let store = EngagementStore::new();
        let target = challenge(&store);

        let err = store.submit("ghost", draft(target.id)).unwrap_err();
        assert!(matches!(err, StoreError::UserNotFound(_)));
        assert!(store.get_all_submissions().is_empty());
        assert_eq!(store.get_challenge(&target.id).unwrap().participant_count, 0);
    }

    #[test]
    fn submissions_are_listed_newest_first() {
        let store = EngagementStore::new();
        let target = challenge(&store);
        store.create_user(new_user("ada")).unwrap();
        for _ in 0..5 {
            store.submit("ada", draft(target.id)).unwrap();
        }

        let all = store.get_all_submissions();
        assert_eq!(all.len(), 5);
        assert!(all.windows(2).all(|w| w[0].created_at >= w[1].created_at));
    }

    #[test]
    fn submissions_by_challenge_keep_insertion_order() {
        let store = EngagementStore::new();
        let first = challenge(&store);
        let second = challenge(&store);
        store.create_user(new_user("ada")).unwrap();

        let a = store.submit("ada", draft(first.id)).unwrap();
        store.submit("ada", draft(second.id)).unwrap();
        let b = store.submit("ada", draft(first.id)).unwrap();

        let ids: Vec<Uuid> = store
            .get_submissions_by_challenge(&first.id)
            .into_iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(ids, vec![a.id, b.id]);
        assert!(store.get_submissions_by_challenge(&Uuid::new_v4()).is_empty());
    }

    #[test]
    fn snapshot_does_not_follow_user_changes() {
        let store = EngagementStore::new();
        let target = challenge(&store);
        let ada = store.create_user(new_user("ada")).unwrap();
        let submission = store.submit("ada", draft(target.id)).unwrap();

        store.update_user_hype_points(&ada.id, 50);
        let stored = store.get_submission(&submission.id).unwrap();
        assert_eq!(stored.username, "ada");
        assert_eq!(stored.hype_count, 0);
    }

    #[test]
    fn increments_on_missing_ids_change_nothing() {
        let store = EngagementStore::new();
        let target = challenge(&store);

        assert!(!store.increment_challenge_participants(&Uuid::new_v4()));
        assert!(!store.increment_submission_hype(&Uuid::new_v4()));
        assert_eq!(store.get_challenge(&target.id).unwrap().participant_count, 0);
        assert!(store.get_all_submissions().is_empty());
    }

    #[test]
    fn second_hype_from_same_user_is_rejected() {
        let store = EngagementStore::new();
        let submission_id = Uuid::new_v4();
        let voter_id = Uuid::new_v4();

        assert!(!store.has_user_hyped(&submission_id, &voter_id));
        store
            .create_hype(NewHype {
                submission_id,
                user_id: voter_id,
            })
            .unwrap();
        assert!(store.has_user_hyped(&submission_id, &voter_id));

        let err = store
            .create_hype(NewHype {
                submission_id,
                user_id: voter_id,
            })
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateHype { .. }));
        assert_eq!(store.hype_total(), 1);
    }

    #[test]
    fn award_hype_rolls_up_counters() {
        let store = EngagementStore::new();
        let target = challenge(&store);
        let ada = store.create_user(new_user("ada")).unwrap();
        let submission = store.submit("ada", draft(target.id)).unwrap();

        let voters = 4;
        for i in 0..voters {
            let voter = store.create_user(new_user(&format!("voter{i}"))).unwrap();
            store.award_hype(submission.id, voter.id).unwrap();
        }

        assert_eq!(
            store.get_submission(&submission.id).unwrap().hype_count,
            voters
        );
        assert_eq!(
            store.get_user(&ada.id).unwrap().total_hype_points,
            HYPE_POINTS * voters
        );
    }

    #[test]
    fn duplicate_award_leaves_counters_untouched() {
        let store = EngagementStore::new();
        let target = challenge(&store);
        let ada = store.create_user(new_user("ada")).unwrap();
        let bola = store.create_user(new_user("bola")).unwrap();
        let submission = store.submit("ada", draft(target.id)).unwrap();

        store.award_hype(submission.id, bola.id).unwrap();
        let err = store.award_hype(submission.id, bola.id).unwrap_err();

        assert!(matches!(err, StoreError::DuplicateHype { .. }));
        assert_eq!(store.get_submission(&submission.id).unwrap().hype_count, 1);
        assert_eq!(store.get_user(&ada.id).unwrap().total_hype_points, 10);
    }

    #[test]
    fn concurrent_duplicate_awards_count_once_per_voter() {
        let store = std::sync::Arc::new(EngagementStore::new());
        let target = challenge(&store);
        let ada = store.create_user(new_user("ada")).unwrap();
        let submission = store.submit("ada", draft(target.id)).unwrap();

        let voters: Vec<Uuid> = (0..20)
            .map(|i| store.create_user(new_user(&format!("voter{i}"))).unwrap().id)
            .collect();

        // Each voter races four times against itself
        let handles: Vec<_> = voters
            .iter()
            .flat_map(|voter| std::iter::repeat_n(*voter, 4))
            .map(|voter| {
                let store = store.clone();
                std::thread::spawn(move || store.award_hype(submission.id, voter).is_ok())
            })
            .collect();

        let accepted = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|ok| *ok)
            .count();

        let expected = voters.len() as u64;
        assert_eq!(accepted, voters.len());
        assert_eq!(store.hype_total(), voters.len());
        assert_eq!(
            store.get_submission(&submission.id).unwrap().hype_count,
            expected
        );
        assert_eq!(
            store.get_user(&ada.id).unwrap().total_hype_points,
            HYPE_POINTS * expected
        );
        assert!(
            voters
                .iter()
                .all(|voter| store.has_user_hyped(&submission.id, voter))
        );
    }

    #[test]
    fn hype_on_unknown_submission_is_recorded_without_counters() {
        let store = EngagementStore::new();
        let target = challenge(&store);
        let ada = store.create_user(new_user("ada")).unwrap();
        let bola = store.create_user(new_user("bola")).unwrap();
        let submission = store.submit("ada", draft(target.id)).unwrap();
        let missing = Uuid::new_v4();

        let hype = store.award_hype(missing, bola.id).unwrap();

        assert_eq!(hype.submission_id, missing);
        assert!(store.has_user_hyped(&missing, &bola.id));
        assert_eq!(store.hype_total(), 1);
        assert_eq!(store.get_submission(&submission.id).unwrap().hype_count, 0);
        assert_eq!(store.get_user(&ada.id).unwrap().total_hype_points, 0);
        assert_eq!(store.get_user(&bola.id).unwrap().total_hype_points, 0);
    }

    #[test]
    fn award_hype_requires_known_voter() {
        let store = EngagementStore::new();
        let target = challenge(&store);
        store.create_user(new_user("ada")).unwrap();
        let submission = store.submit("ada", draft(target.id)).unwrap();
        let stranger = Uuid::new_v4();

        let err = store.award_hype(submission.id, stranger).unwrap_err();
        assert!(matches!(err, StoreError::UserNotFound(_)));
        assert!(!store.has_user_hyped(&submission.id, &stranger));
    }

    #[test]
    fn leaderboard_ranks_by_points() {
        let store = EngagementStore::new();
        let ada = store.create_user(new_user("ada")).unwrap();
        let bola = store.create_user(new_user("bola")).unwrap();
        store.create_user(new_user("chidi")).unwrap();
        store.update_user_hype_points(&bola.id, 20);
        store.update_user_hype_points(&ada.id, 10);

        let ranked: Vec<String> = store
            .get_leaderboard()
            .into_iter()
            .map(|u| u.username)
            .collect();
        assert_eq!(ranked, vec!["bola", "ada", "chidi"]);
    }
}
