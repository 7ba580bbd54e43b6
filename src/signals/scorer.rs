//! Confluence scoring
//!
//! Fuses the pair's indicator snapshots, the dominant candlestick
//! pattern, the volume-spike flag, the reference trend bias and the
//! evaluation hour into a directional score between 1 and 7. A
//! candidate qualifies once the score clears the configured minimum
//! and the reference bias does not strictly oppose it. When both
//! directions would qualify in the same evaluation, the contradiction
//! is resolved to no signal: ambiguity is absence of edge.

use tracing::{debug, info};

use crate::config::ScoringParams;
use crate::models::indicators::{IndicatorSnapshot, RsiValue};
use crate::models::signal::{Direction, Polarity, TrendBias};
use crate::patterns::PatternResult;

/// Inputs for scoring one pair in one cycle.
#[derive(Debug, Clone)]
pub struct ScoreInput<'a> {
    pub pair: &'a str,
    /// Snapshot of the entry timeframe (RSI, OBV, volume, ATR).
    pub entry: &'a IndicatorSnapshot,
    /// Snapshot of the trend timeframe (EMA ordering).
    pub trend: &'a IndicatorSnapshot,
    pub pattern: PatternResult,
    pub bias: TrendBias,
    pub utc_hour: u32,
}

/// Score and confirming reasons for one direction.
#[derive(Debug, Clone)]
pub struct DirectionScore {
    pub direction: Direction,
    pub score: u8,
    pub reasons: Vec<String>,
}

/// Evaluation state for a (pair, cycle).
///
/// A candidate is the leading direction that did not clear the gate;
/// only qualified states produce a signal.
#[derive(Debug, Clone)]
pub enum SignalState {
    NoSignal,
    CandidateLong(DirectionScore),
    CandidateShort(DirectionScore),
    QualifiedLong(DirectionScore),
    QualifiedShort(DirectionScore),
}

impl SignalState {
    pub fn qualified(&self) -> Option<&DirectionScore> {
        match self {
            SignalState::QualifiedLong(score) | SignalState::QualifiedShort(score) => Some(score),
            _ => None,
        }
    }
}

/// Run the scoring state machine for one pair.
pub fn evaluate(input: &ScoreInput<'_>, params: &ScoringParams) -> SignalState {
    let long = score_direction(Direction::Long, input, params);
    let short = score_direction(Direction::Short, input, params);

    let long_qualifies = qualifies(&long, input.bias, params);
    let short_qualifies = qualifies(&short, input.bias, params);

    if long_qualifies && short_qualifies {
        // Contradictory confirmation: both directions cleared the gate.
        info!(
            pair = %input.pair,
            long_score = long.score,
            short_score = short.score,
            "ambiguous signal, both directions qualified - resolving to no signal"
        );
        return SignalState::NoSignal;
    }
    if long_qualifies {
        return SignalState::QualifiedLong(long);
    }
    if short_qualifies {
        return SignalState::QualifiedShort(short);
    }

    debug!(
        pair = %input.pair,
        long_score = long.score,
        short_score = short.score,
        min_score = params.min_score,
        "no qualified direction"
    );

    let long_vetoed = input.bias.direction.opposes(Direction::Long);
    let short_vetoed = input.bias.direction.opposes(Direction::Short);
    if long.score > short.score && long.score > 0 && !long_vetoed {
        SignalState::CandidateLong(long)
    } else if short.score > long.score && short.score > 0 && !short_vetoed {
        SignalState::CandidateShort(short)
    } else {
        SignalState::NoSignal
    }
}

fn qualifies(score: &DirectionScore, bias: TrendBias, params: &ScoringParams) -> bool {
    // A strictly opposing reference trend vetoes regardless of score.
    if bias.direction.opposes(score.direction) {
        return false;
    }
    score.score >= params.min_score
}

/// Additive score: one point per confirming factor, missing indicators
/// never confirm.
fn score_direction(
    direction: Direction,
    input: &ScoreInput<'_>,
    params: &ScoringParams,
) -> DirectionScore {
    let mut score = 0u8;
    let mut reasons = Vec::new();
    let mut confirm = |reason: String| {
        score += 1;
        reasons.push(reason);
    };

    if let Some(reason) = rsi_confirmation(direction, input.entry, params) {
        confirm(reason);
    }
    if let Some(reason) = ema_confirmation(direction, input.trend) {
        confirm(reason);
    }
    if let Some(reason) = obv_confirmation(direction, input.entry) {
        confirm(reason);
    }
    if input.entry.volume_spike {
        let ratio = input
            .entry
            .volume_avg
            .filter(|avg| *avg > 0.0)
            .map(|avg| input.entry.volume / avg);
        confirm(match ratio {
            Some(ratio) => format!("volume spike ({ratio:.1}x average)"),
            None => "volume spike".to_string(),
        });
    }
    if input.pattern.polarity.confirms(direction) {
        if let Some(pattern) = input.pattern.pattern {
            confirm(format!("{} pattern", pattern.name()));
        }
    }
    if input.bias.direction.confirms(direction) {
        let label = if input.bias.direction == Polarity::Bullish {
            "bullish"
        } else {
            "bearish"
        };
        confirm(format!("reference trend {label}"));
    }
    if params.priority_hours.contains(&input.utc_hour) {
        confirm(format!("priority hour ({} UTC)", input.utc_hour));
    }

    DirectionScore {
        direction,
        score,
        reasons,
    }
}

/// One point when either RSI period sits in the zone appropriate to the
/// direction; both confirming still count once.
fn rsi_confirmation(
    direction: Direction,
    snapshot: &IndicatorSnapshot,
    params: &ScoringParams,
) -> Option<String> {
    let check = |rsi: Option<RsiValue>| -> Option<String> {
        let rsi = rsi?;
        match direction {
            Direction::Long if rsi.value < params.rsi_oversold => {
                Some(format!("RSI({}) oversold ({:.1})", rsi.period, rsi.value))
            }
            Direction::Short if rsi.value > params.rsi_overbought => {
                Some(format!("RSI({}) overbought ({:.1})", rsi.period, rsi.value))
            }
            _ => None,
        }
    };

    check(snapshot.rsi_short).or_else(|| check(snapshot.rsi_long))
}

fn ema_confirmation(direction: Direction, snapshot: &IndicatorSnapshot) -> Option<String> {
    let fast = snapshot.ema_fast?;
    let slow = snapshot.ema_slow?;
    match direction {
        Direction::Long if fast > slow => Some("EMA trend bullish".to_string()),
        Direction::Short if fast < slow => Some("EMA trend bearish".to_string()),
        _ => None,
    }
}

fn obv_confirmation(direction: Direction, snapshot: &IndicatorSnapshot) -> Option<String> {
    let slope = snapshot.obv_slope?;
    match direction {
        Direction::Long if slope > 0.0 => Some("OBV rising".to_string()),
        Direction::Short if slope < 0.0 => Some("OBV falling".to_string()),
        _ => None,
    }
}
