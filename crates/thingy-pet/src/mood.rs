use thingy_config::HappinessTuning;

/// The three happiness bands that pick the idle clip's emotional suffix.
///
/// Variants are ordered low to high, so bands compare like the happiness
/// values that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MoodBand {
    /// Below `low_band`.
    Angry,
    /// Between the band edges, inclusive.
    Neutral,
    /// Above `high_band`.
    Happy,
}

impl MoodBand {
    pub fn of(happiness: f32, tuning: &HappinessTuning) -> Self {
        if happiness < tuning.low_band {
            MoodBand::Angry
        } else if happiness > tuning.high_band {
            MoodBand::Happy
        } else {
            MoodBand::Neutral
        }
    }

    /// Clip-name suffix for this band.
    pub fn suffix(self) -> &'static str {
        match self {
            MoodBand::Angry => "_angry",
            MoodBand::Neutral => "",
            MoodBand::Happy => "_happy",
        }
    }
}

/// True when moving from `before` to `after` lands in a different band.
pub fn crosses_band(before: f32, after: f32, tuning: &HappinessTuning) -> bool {
    MoodBand::of(before, tuning) != MoodBand::of(after, tuning)
}
