use serde::{Deserialize, Serialize};

/// Relative importance of each factor. The table sums to 1.0.
pub const FACTOR_WEIGHTS: FactorWeights = FactorWeights {
    values: 0.25,
    parenting_philosophy: 0.20,
    involvement: 0.20,
    lifestyle: 0.10,
    languages: 0.10,
    looking_for: 0.10,
    interests: 0.02,
    causes: 0.02,
    location: 0.005,
    age: 0.005,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FactorWeights {
    pub values: f64,
    pub parenting_philosophy: f64,
    pub involvement: f64,
    pub lifestyle: f64,
    pub languages: f64,
    pub looking_for: f64,
    pub interests: f64,
    pub causes: f64,
    pub location: f64,
    pub age: f64,
}

impl FactorWeights {
    pub fn weight_for(&self, factor: FactorKind) -> f64 {
        match factor {
            FactorKind::Values => self.values,
            FactorKind::ParentingPhilosophy => self.parenting_philosophy,
            FactorKind::Involvement => self.involvement,
            FactorKind::Lifestyle => self.lifestyle,
            FactorKind::Languages => self.languages,
            FactorKind::LookingFor => self.looking_for,
            FactorKind::Interests => self.interests,
            FactorKind::Causes => self.causes,
            FactorKind::Location => self.location,
            FactorKind::Age => self.age,
        }
    }

    pub fn sum(&self) -> f64 {
        FactorKind::ALL
            .iter()
            .map(|factor| self.weight_for(*factor))
            .sum()
    }
}

/// The ten compatibility factors, in weight order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FactorKind {
    Values,
    ParentingPhilosophy,
    Involvement,
    Lifestyle,
    Languages,
    LookingFor,
    Interests,
    Causes,
    Location,
    Age,
}

impl FactorKind {
    pub const ALL: [FactorKind; 10] = [
        FactorKind::Values,
        FactorKind::ParentingPhilosophy,
        FactorKind::Involvement,
        FactorKind::Lifestyle,
        FactorKind::Languages,
        FactorKind::LookingFor,
        FactorKind::Interests,
        FactorKind::Causes,
        FactorKind::Location,
        FactorKind::Age,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            FactorKind::Values => "values",
            FactorKind::ParentingPhilosophy => "parentingPhilosophy",
            FactorKind::Involvement => "involvement",
            FactorKind::Lifestyle => "lifestyle",
            FactorKind::Languages => "languages",
            FactorKind::LookingFor => "lookingFor",
            FactorKind::Interests => "interests",
            FactorKind::Causes => "causes",
            FactorKind::Location => "location",
            FactorKind::Age => "age",
        }
    }

    pub fn weight(self) -> f64 {
        FACTOR_WEIGHTS.weight_for(self)
    }
}
