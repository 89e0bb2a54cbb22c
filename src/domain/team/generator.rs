use chrono::Utc;
use uuid::Uuid;

use super::errors::{TeamGenerationError, TeamGenerationResult};
use super::team::Team;
use super::value_objects::TeamSizePolicy;
use crate::domain::participant::{Gender, Participant};

/// Team size the generator aims for before falling back to the policy minimum
pub const IDEAL_TEAM_SIZE: usize = 5;

/// Number of teams to build for `participant_count` participants
///
/// Starts from `ceil(n / IDEAL_TEAM_SIZE)`; when that would leave teams
/// smaller than the policy minimum, falls back to `floor(n / MIN)`. The
/// maximum is not enforced, so the fallback can produce oversized teams
/// (7 participants make a single team of 7).
///
/// # Example
/// ```
/// use training_teams_api::domain::team::generator::team_count;
///
/// assert_eq!(team_count(12), 3);
/// assert_eq!(team_count(20), 4);
/// assert_eq!(team_count(7), 1);
/// ```
pub fn team_count(participant_count: usize) -> usize {
    let ideal = participant_count.div_ceil(IDEAL_TEAM_SIZE);
    if ideal == 0 {
        return 0;
    }

    if participant_count < ideal * TeamSizePolicy::MIN {
        participant_count / TeamSizePolicy::MIN
    } else {
        ideal
    }
}

/// Bucket that receives the `index`-th member of a snake draft over `buckets`
///
/// Walks `0..N-1`, then `N-1..0`, and so on, so boundary buckets receive two
/// consecutive picks at every turn.
pub fn serpentine_bucket(index: usize, buckets: usize) -> usize {
    let lap = index % (2 * buckets);
    if lap < buckets {
        lap
    } else {
        2 * buckets - 1 - lap
    }
}

/// Partitions participants into balanced teams for a training session
///
/// Female participants are drafted first, then male participants, each with
/// a serpentine draft over the level-descending order. Participants without
/// a known gender are then placed one by one into the smallest team. Sorting
/// is stable, so equal levels keep their input order and the output is fully
/// deterministic apart from the minted team ids.
///
/// # Errors
/// - `InsufficientParticipants` when fewer than `TeamSizePolicy::MIN`
///   participants are given
/// - `UnrepresentableLevel` when a team's mean level is NaN, infinite or
///   outside the `Decimal` range
pub fn generate_teams(
    session_id: Uuid,
    participants: &[Participant],
) -> TeamGenerationResult<Vec<Team>> {
    if participants.len() < TeamSizePolicy::MIN {
        return Err(TeamGenerationError::InsufficientParticipants {
            count: participants.len(),
            minimum: TeamSizePolicy::MIN,
        });
    }

    let count = team_count(participants.len());
    let mut buckets: Vec<Vec<&Participant>> = vec![Vec::new(); count];

    for gender in [Gender::Female, Gender::Male] {
        let group = sorted_by_level(participants.iter().filter(|p| p.gender() == Some(gender)));

        for (index, participant) in group.into_iter().enumerate() {
            buckets[serpentine_bucket(index, count)].push(participant);
        }
    }

    let unknown = sorted_by_level(participants.iter().filter(|p| p.gender().is_none()));
    for participant in unknown {
        // min_by_key keeps the first of equal minima, so the lowest index wins
        if let Some(smallest) = buckets.iter_mut().min_by_key(|bucket| bucket.len()) {
            smallest.push(participant);
        }
    }

    let created_at = Utc::now();
    let teams = buckets
        .into_iter()
        .zip(1u32..)
        .map(|(members, number)| {
            let ids: Vec<Uuid> = members.iter().map(|p| p.id()).collect();
            let levels: Vec<f64> = members.iter().map(|p| p.level()).collect();
            Team::new(session_id, number, ids, &levels, created_at)
        })
        .collect::<TeamGenerationResult<Vec<Team>>>()?;

    for team in teams.iter().filter(|team| !team.has_valid_size()) {
        tracing::warn!(
            session_id = %session_id,
            team = team.name(),
            size = team.size(),
            "Generated team outside nominal size range"
        );
    }

    Ok(teams)
}

fn sorted_by_level<'a>(group: impl Iterator<Item = &'a Participant>) -> Vec<&'a Participant> {
    let mut group: Vec<&Participant> = group.collect();
    group.sort_by(|a, b| b.level().total_cmp(&a.level()));
    group
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::collections::HashSet;

    fn participants(levels: &[f64], gender: Option<Gender>) -> Vec<Participant> {
        levels
            .iter()
            .map(|&level| Participant::new(Uuid::new_v4(), gender, level))
            .collect()
    }

    #[test]
    fn team_count_table() {
        let expected = [
            (4, 1),
            (5, 1),
            (6, 1),
            (7, 1),
            (8, 2),
            (9, 2),
            (10, 2),
            (11, 2),
            (12, 3),
            (15, 3),
            (16, 4),
            (20, 4),
            (21, 5),
        ];
        for (n, teams) in expected {
            assert_eq!(team_count(n), teams, "participants: {}", n);
        }
    }

    #[test]
    fn team_count_of_nothing_is_zero() {
        assert_eq!(team_count(0), 0);
    }

    #[test]
    fn serpentine_walks_back_and_forth() {
        let order: Vec<usize> = (0..9).map(|i| serpentine_bucket(i, 3)).collect();
        assert_eq!(order, vec![0, 1, 2, 2, 1, 0, 0, 1, 2]);
    }

    #[test]
    fn serpentine_with_single_bucket() {
        assert!((0..5).all(|i| serpentine_bucket(i, 1) == 0));
    }

    #[test]
    fn fewer_than_minimum_fails() {
        for n in 0..TeamSizePolicy::MIN {
            let input = participants(&vec![1.0; n], None);
            let result = generate_teams(Uuid::new_v4(), &input);

            assert_eq!(
                result,
                Err(TeamGenerationError::InsufficientParticipants {
                    count: n,
                    minimum: TeamSizePolicy::MIN
                })
            );
        }
    }

    #[test]
    fn twelve_same_gender_make_three_valid_teams() {
        let levels: Vec<f64> = (1..=12).map(f64::from).collect();
        let input = participants(&levels, Some(Gender::Male));

        let teams = generate_teams(Uuid::new_v4(), &input).unwrap();

        assert_eq!(teams.len(), 3);
        assert!(teams.iter().all(|t| t.has_valid_size()));
    }

    #[test]
    fn twenty_participants_make_four_teams() {
        let levels: Vec<f64> = (1..=20).map(f64::from).collect();
        let input = participants(&levels, None);

        let teams = generate_teams(Uuid::new_v4(), &input).unwrap();

        assert_eq!(teams.len(), 4);
        assert!(teams.iter().all(|t| t.has_valid_size()));
        assert_eq!(teams.iter().map(Team::size).sum::<usize>(), 20);
    }

    #[test]
    fn serpentine_keeps_averages_close() {
        let input = participants(
            &[100.0, 90.0, 80.0, 70.0, 60.0, 50.0, 40.0, 30.0, 20.0, 10.0],
            Some(Gender::Female),
        );

        let teams = generate_teams(Uuid::new_v4(), &input).unwrap();

        assert_eq!(teams.len(), 2);
        // 100, 70, 60, 30, 20 against 90, 80, 50, 40, 10
        assert_eq!(teams[0].average_level(), Decimal::from(56));
        assert_eq!(teams[1].average_level(), Decimal::from(54));
        let diff = (teams[0].average_level() - teams[1].average_level()).abs();
        assert!(diff < Decimal::from(30));
    }

    #[test]
    fn larger_gender_group_covers_every_team() {
        let mut input = participants(&[5.0, 4.0], Some(Gender::Female));
        input.extend(participants(&[9.0, 8.0, 7.0, 6.0, 5.0, 4.0, 3.0, 2.0], Some(Gender::Male)));
        let males: HashSet<Uuid> = input
            .iter()
            .filter(|p| p.gender() == Some(Gender::Male))
            .map(|p| p.id())
            .collect();

        let teams = generate_teams(Uuid::new_v4(), &input).unwrap();

        assert_eq!(teams.len(), 2);
        for team in &teams {
            assert!(team.member_ids().iter().any(|id| males.contains(id)), "{}", team.name());
        }
    }

    #[test]
    fn females_pick_first() {
        let female = participants(&[1.0], Some(Gender::Female));
        let mut input = participants(&[50.0; 7], Some(Gender::Male));
        input.extend(female.clone());

        let teams = generate_teams(Uuid::new_v4(), &input).unwrap();

        assert_eq!(teams[0].member_ids()[0], female[0].id());
    }

    #[test]
    fn unknown_gender_fills_smallest_team_first() {
        // 3 females over 2 teams: Team 1 gets one, Team 2 gets two
        let mut input = participants(&[9.0, 8.0, 7.0], Some(Gender::Female));
        let unknown = participants(&[3.0, 2.0, 1.0, 0.5, 0.2], None);
        input.extend(unknown.clone());

        let teams = generate_teams(Uuid::new_v4(), &input).unwrap();

        assert_eq!(teams.len(), 2);
        assert_eq!(teams[0].member_ids()[1], unknown[0].id());
        assert_eq!(teams[0].member_ids()[2], unknown[1].id());
        assert_eq!(teams[1].member_ids()[2], unknown[2].id());
        assert_eq!(teams[0].size(), 4);
        assert_eq!(teams[1].size(), 4);
    }

    #[test]
    fn equal_levels_keep_input_order() {
        let input = participants(&[5.0; 8], Some(Gender::Male));

        let teams = generate_teams(Uuid::new_v4(), &input).unwrap();

        let expected_first: Vec<Uuid> = [0, 3, 4, 7].iter().map(|&i| input[i].id()).collect();
        let expected_second: Vec<Uuid> = [1, 2, 5, 6].iter().map(|&i| input[i].id()).collect();
        assert_eq!(teams[0].member_ids(), expected_first.as_slice());
        assert_eq!(teams[1].member_ids(), expected_second.as_slice());
    }

    #[test]
    fn output_is_deterministic_apart_from_ids() {
        let mut input = participants(&[3.0, 7.0, 1.0, 9.0], Some(Gender::Female));
        input.extend(participants(&[2.0, 2.0, 8.0], Some(Gender::Male)));
        input.extend(participants(&[4.0, 6.0], None));
        let session_id = Uuid::new_v4();

        let first = generate_teams(session_id, &input).unwrap();
        let second = generate_teams(session_id, &input).unwrap();

        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.member_ids(), b.member_ids());
            assert_eq!(a.average_level(), b.average_level());
            assert_ne!(a.id(), b.id());
        }
    }

    #[test]
    fn names_are_sequential_and_share_a_timestamp() {
        let input = participants(&[1.0; 16], None);

        let teams = generate_teams(Uuid::new_v4(), &input).unwrap();

        let names: Vec<&str> = teams.iter().map(Team::name).collect();
        assert_eq!(names, vec!["Team 1", "Team 2", "Team 3", "Team 4"]);
        assert!(teams.iter().all(|t| t.created_at() == teams[0].created_at()));
    }

    #[test]
    fn nan_level_fails_generation() {
        let mut input = participants(&[1.0, 2.0, 3.0], Some(Gender::Male));
        input.push(Participant::new(Uuid::new_v4(), Some(Gender::Female), f64::NAN));

        let result = generate_teams(Uuid::new_v4(), &input);

        assert!(matches!(result, Err(TeamGenerationError::UnrepresentableLevel(_))));
    }

    #[test]
    fn huge_level_fails_generation() {
        let input = participants(&[1e30, 1.0, 1.0, 1.0], None);

        let result = generate_teams(Uuid::new_v4(), &input);

        assert!(matches!(result, Err(TeamGenerationError::UnrepresentableLevel(_))));
    }

    #[test]
    fn recount_can_exceed_maximum() {
        let input = participants(&[1.0; 7], None);

        let teams = generate_teams(Uuid::new_v4(), &input).unwrap();

        assert_eq!(teams.len(), 1);
        assert_eq!(teams[0].size(), 7);
        assert!(!teams[0].has_valid_size());
    }
}
