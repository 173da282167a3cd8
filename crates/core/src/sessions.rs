use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::types::{CoachingSessionRecord, SessionType};

#[derive(Debug, Default)]
pub struct SessionPartition<'a> {
    pub upcoming: Vec<&'a CoachingSessionRecord>,
    pub past: Vec<&'a CoachingSessionRecord>,
}

/// Both halves come back in ascending schedule order.
pub fn partition_sessions(
    sessions: &[CoachingSessionRecord],
    now: DateTime<Utc>,
) -> SessionPartition<'_> {
    let mut ordered: Vec<&CoachingSessionRecord> = sessions.iter().collect();
    ordered.sort_by_key(|session| session.schedule);

    let (upcoming, past) = ordered
        .into_iter()
        .partition(|session| session.is_upcoming(now));

    SessionPartition { upcoming, past }
}

pub fn next_session(
    sessions: &[CoachingSessionRecord],
    now: DateTime<Utc>,
) -> Option<&CoachingSessionRecord> {
    sessions
        .iter()
        .filter(|session| session.is_upcoming(now))
        .min_by_key(|session| session.schedule)
}

pub fn count_by_type(sessions: &[CoachingSessionRecord]) -> BTreeMap<SessionType, usize> {
    let mut counts: BTreeMap<SessionType, usize> =
        SessionType::ALL.iter().map(|t| (*t, 0)).collect();
    for session in sessions {
        *counts.entry(session.session_type).or_default() += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn session(id: u32, session_type: SessionType, schedule: DateTime<Utc>) -> CoachingSessionRecord {
        CoachingSessionRecord {
            id,
            title: format!("Session {id}"),
            session_type,
            schedule,
            description: String::new(),
            max_participants: 6,
            current_participants: 0,
            price: 0.0,
            duration: 45,
            join_link: String::new(),
        }
    }

    #[test]
    fn yesterday_and_tomorrow_split_around_now() {
        let now = Utc::now();
        let sessions = vec![
            session(1, SessionType::Group, now + Duration::days(1)),
            session(2, SessionType::Group, now - Duration::days(1)),
        ];
        let partition = partition_sessions(&sessions, now);
        assert_eq!(partition.upcoming.iter().map(|s| s.id).collect::<Vec<_>>(), vec![1]);
        assert_eq!(partition.past.iter().map(|s| s.id).collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn upcoming_is_sorted_and_next_is_earliest() {
        let now = Utc::now();
        let sessions = vec![
            session(1, SessionType::Workshop, now + Duration::days(9)),
            session(2, SessionType::Individual, now + Duration::hours(3)),
            session(3, SessionType::Group, now + Duration::days(2)),
        ];
        let partition = partition_sessions(&sessions, now);
        assert_eq!(
            partition.upcoming.iter().map(|s| s.id).collect::<Vec<_>>(),
            vec![2, 3, 1]
        );
        assert!(partition.past.is_empty());
        assert_eq!(next_session(&sessions, now).map(|s| s.id), Some(2));
        assert!(next_session(&sessions, now + Duration::days(30)).is_none());
    }

    #[test]
    fn counts_include_every_type() {
        let now = Utc::now();
        let sessions = vec![
            session(1, SessionType::Group, now),
            session(2, SessionType::Group, now),
            session(3, SessionType::Individual, now),
        ];
        let counts = count_by_type(&sessions);
        assert_eq!(counts[&SessionType::Group], 2);
        assert_eq!(counts[&SessionType::Individual], 1);
        assert_eq!(counts[&SessionType::Workshop], 0);
    }
}
