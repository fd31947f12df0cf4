//! Per-mode rules consulted by the session state machine.

use crate::model::Mode;

use super::{CerdasPhase, PHASE_ONE_QUOTA, Session};

/// Pure rule set for one mode.
pub(crate) struct ModeRules {
    /// Applied right after an answer is written.
    pub score: fn(&mut Session, bool),
    /// True when the playthrough must end regardless of remaining questions.
    pub exhausted: fn(&Session) -> bool,
    /// Applied when moving on to the next question.
    pub rotate: fn(&mut Session),
}

static CLASSIC: ModeRules = ModeRules {
    score: no_score,
    exhausted: never,
    rotate: no_rotation,
};

static TEAM: ModeRules = ModeRules {
    score: credit_turn_team,
    exhausted: never,
    rotate: next_team,
};

static SURVIVAL: ModeRules = ModeRules {
    score: lose_life_on_miss,
    exhausted: out_of_lives,
    rotate: no_rotation,
};

static CERDAS: ModeRules = ModeRules {
    score: credit_turn_team,
    exhausted: never,
    rotate: count_turn_then_rotate,
};

pub(crate) fn rules(mode: Mode) -> &'static ModeRules {
    match mode {
        // Countdown scores like classic; its timer lives outside the core.
        Mode::Classic | Mode::Countdown => &CLASSIC,
        Mode::Team => &TEAM,
        Mode::Survival => &SURVIVAL,
        Mode::Cerdas => &CERDAS,
    }
}

fn no_score(_: &mut Session, _: bool) {}

fn credit_turn_team(session: &mut Session, correct: bool) {
    if !correct {
        return;
    }
    let turn = session.turn_team;
    let Some(scores) = session.team_scores.as_mut() else {
        return;
    };
    debug_assert!(
        turn < scores.len(),
        "turn team {turn} outside {} scored teams",
        scores.len()
    );
    if let Some(score) = scores.get_mut(turn) {
        *score += 1;
    }
}

fn lose_life_on_miss(session: &mut Session, correct: bool) {
    if correct {
        return;
    }
    if let Some(lives) = session.lives.as_mut() {
        *lives = lives.saturating_sub(1);
    }
}

fn never(_: &Session) -> bool {
    false
}

fn out_of_lives(session: &Session) -> bool {
    session.lives.is_some_and(|lives| lives == 0)
}

fn no_rotation(_: &mut Session) {}

fn next_team(session: &mut Session) {
    session.turn_team = (session.turn_team + 1) % session.team_count.max(1);
}

/// Quota round bookkeeping, then the same round-robin as team play.
///
/// The team that just played gets one more counted turn; once every team has
/// reached the quota the session moves to the remainder round for good.
fn count_turn_then_rotate(session: &mut Session) {
    let team_count = session.team_count;
    if session.cerdas_phase == Some(CerdasPhase::Quota) {
        let turn = session.turn_team;
        if let Some(counts) = session.cerdas_count_by_team.as_mut() {
            if let Some(count) = counts.get_mut(turn) {
                *count += 1;
            }
            let all_reached = (0..team_count)
                .all(|team| counts.get(team).copied().unwrap_or(0) >= PHASE_ONE_QUOTA);
            if all_reached {
                session.cerdas_phase = Some(CerdasPhase::Remainder);
            }
        }
    }
    next_team(session);
}
