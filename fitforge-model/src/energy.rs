//! Energy-expenditure and body-composition arithmetic.
//!
//! Pure, stateless functions over validated scalar inputs. Validation is the
//! caller's obligation: the boundary rejects out-of-range values before
//! anything here runs (see [`AnthropometricInput::validate`]), and none of
//! the calculations re-check their arguments.

use crate::profile::{ActivityLevel, Sex};

pub const MIN_AGE: u32 = 13;
pub const MAX_AGE: u32 = 120;
pub const MAX_HEIGHT_CM: f64 = 300.0;
pub const MAX_WEIGHT_KG: f64 = 500.0;

/// Round to 2 decimal places, half away from zero.
fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// The scalar inputs every calculation starts from.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnthropometricInput {
    pub weight_kg: f64,
    pub height_cm: f64,
    pub age: u32,
    pub sex: Sex,
}

impl AnthropometricInput {
    /// Range-check every field, returning one message per violation so the
    /// boundary can report them all at once.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut violations = Vec::new();
        if !(self.weight_kg > 0.0 && self.weight_kg <= MAX_WEIGHT_KG) {
            violations.push(format!(
                "weight_kg must be greater than 0 and at most {MAX_WEIGHT_KG}"
            ));
        }
        if !(self.height_cm > 0.0 && self.height_cm <= MAX_HEIGHT_CM) {
            violations.push(format!(
                "height_cm must be greater than 0 and at most {MAX_HEIGHT_CM}"
            ));
        }
        if !(MIN_AGE..=MAX_AGE).contains(&self.age) {
            violations.push(format!("age must be between {MIN_AGE} and {MAX_AGE}"));
        }
        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// Everything derived from one TDEE calculation. All values in kcal except
/// the macro fields, which are grams. Field names are part of the public
/// JSON contract and must not change.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnergyProfile {
    pub bmr: f64,
    pub tdee: f64,
    pub activity_multiplier: f64,
    pub maintenance_calories: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
    pub mild_weight_loss: f64,
    pub weight_loss: f64,
    pub extreme_weight_loss: f64,
    pub mild_weight_gain: f64,
    pub weight_gain: f64,
    pub fast_weight_gain: f64,
}

/// Basal metabolic rate by the Mifflin-St Jeor equation, in kcal/day,
/// rounded to 2 decimals.
pub fn basal_metabolic_rate(input: &AnthropometricInput) -> f64 {
    let base = 10.0 * input.weight_kg + 6.25 * input.height_cm - 5.0 * f64::from(input.age);
    let bmr = match input.sex {
        Sex::Male => base + 5.0,
        Sex::Female => base - 161.0,
    };
    round2(bmr)
}

/// TDEE plus macro split and the calorie-goal ladder.
///
/// Macro policy is fixed: 2 g protein per kg body weight, 25% of calories
/// from fat at 9 kcal/g, carbs from the remainder at 4 kcal/g. The carbs
/// remainder is computed from the already-rounded protein and fat grams,
/// which keeps stored and displayed values bit-identical with historical
/// output at the cost of up to 0.02 g of rounding drift.
pub fn energy_profile(input: &AnthropometricInput, activity: ActivityLevel) -> EnergyProfile {
    let bmr = basal_metabolic_rate(input);
    let multiplier = activity.multiplier();
    let tdee = round2(bmr * multiplier);

    let protein_g = round2(input.weight_kg * 2.0);
    let fat_g = round2(tdee * 0.25 / 9.0);
    let carbs_g = round2((tdee - protein_g * 4.0 - fat_g * 9.0) / 4.0);

    EnergyProfile {
        bmr,
        tdee,
        activity_multiplier: multiplier,
        maintenance_calories: tdee,
        protein_g,
        carbs_g,
        fat_g,
        mild_weight_loss: round2(tdee - 250.0),
        weight_loss: round2(tdee - 500.0),
        extreme_weight_loss: round2(tdee - 1000.0),
        mild_weight_gain: round2(tdee + 250.0),
        weight_gain: round2(tdee + 500.0),
        fast_weight_gain: round2(tdee + 1000.0),
    }
}

/// Body mass index, rounded to 2 decimals. Both inputs must be strictly
/// positive; the boundary rejects anything else before calling.
pub fn body_mass_index(weight_kg: f64, height_cm: f64) -> f64 {
    let height_m = height_cm / 100.0;
    round2(weight_kg / (height_m * height_m))
}

/// WHO BMI classification. Bands are left-closed: 18.5 is already
/// "Normal weight", 25.0 "Overweight", 30.0 "Obese".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize, strum::Display)
)]
pub enum BmiCategory {
    #[cfg_attr(feature = "serde", strum(to_string = "Underweight"))]
    Underweight,
    #[cfg_attr(
        feature = "serde",
        serde(rename = "Normal weight"),
        strum(to_string = "Normal weight")
    )]
    NormalWeight,
    #[cfg_attr(feature = "serde", strum(to_string = "Overweight"))]
    Overweight,
    #[cfg_attr(feature = "serde", strum(to_string = "Obese"))]
    Obese,
}

impl BmiCategory {
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < 18.5 {
            BmiCategory::Underweight
        } else if bmi < 25.0 {
            BmiCategory::NormalWeight
        } else if bmi < 30.0 {
            BmiCategory::Overweight
        } else {
            BmiCategory::Obese
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(weight_kg: f64, height_cm: f64, age: u32, sex: Sex) -> AnthropometricInput {
        AnthropometricInput {
            weight_kg,
            height_cm,
            age,
            sex,
        }
    }

    #[test]
    fn bmr_male_reference_case() {
        // (10*80) + (6.25*180) - (5*25) + 5 = 1805
        assert_eq!(basal_metabolic_rate(&input(80.0, 180.0, 25, Sex::Male)), 1805.0);
    }

    #[test]
    fn bmr_female_reference_case() {
        // (10*60) + (6.25*165) - (5*30) - 161 = 1320.25
        assert_eq!(
            basal_metabolic_rate(&input(60.0, 165.0, 30, Sex::Female)),
            1320.25
        );
    }

    #[test]
    fn bmr_male_always_exceeds_female() {
        let test_data = [
            (80.0, 180.0, 25),
            (60.0, 165.0, 30),
            (45.5, 150.0, 13),
            (120.0, 200.0, 80),
        ];

        for (weight_kg, height_cm, age) in test_data {
            let male = basal_metabolic_rate(&input(weight_kg, height_cm, age, Sex::Male));
            let female = basal_metabolic_rate(&input(weight_kg, height_cm, age, Sex::Female));
            assert_eq!(male - female, 166.0);
        }
    }

    #[test]
    fn tdee_sedentary_reference_case() {
        let profile = energy_profile(&input(80.0, 180.0, 25, Sex::Male), ActivityLevel::Sedentary);

        assert_eq!(profile.bmr, 1805.0);
        assert_eq!(profile.activity_multiplier, 1.2);
        assert_eq!(profile.tdee, 2166.0);
        assert_eq!(profile.maintenance_calories, profile.tdee);
    }

    #[test]
    fn tdee_is_bmr_scaled_by_multiplier() {
        let levels = [
            ActivityLevel::Sedentary,
            ActivityLevel::Light,
            ActivityLevel::Moderate,
            ActivityLevel::Active,
            ActivityLevel::VeryActive,
        ];

        let anthro = input(70.0, 170.0, 40, Sex::Female);
        for level in levels {
            let profile = energy_profile(&anthro, level);
            assert!((profile.tdee - profile.bmr * level.multiplier()).abs() < 0.005);
        }
    }

    #[test]
    fn macro_split_uses_rounded_intermediates() {
        let profile = energy_profile(&input(83.3, 177.0, 29, Sex::Male), ActivityLevel::Moderate);

        // Carbs are derived from the rounded protein and fat grams.
        let expected_carbs =
            ((profile.tdee - profile.protein_g * 4.0 - profile.fat_g * 9.0) / 4.0 * 100.0).round()
                / 100.0;
        assert_eq!(profile.carbs_g, expected_carbs);
        assert_eq!(profile.protein_g, 166.6);
    }

    #[test]
    fn calorie_goal_ladder_offsets_maintenance() {
        let profile = energy_profile(&input(80.0, 180.0, 25, Sex::Male), ActivityLevel::Active);
        let tdee = profile.maintenance_calories;

        assert_eq!(profile.mild_weight_loss, tdee - 250.0);
        assert_eq!(profile.weight_loss, tdee - 500.0);
        assert_eq!(profile.extreme_weight_loss, tdee - 1000.0);
        assert_eq!(profile.mild_weight_gain, tdee + 250.0);
        assert_eq!(profile.weight_gain, tdee + 500.0);
        assert_eq!(profile.fast_weight_gain, tdee + 1000.0);
    }

    #[test]
    fn bmi_reference_cases() {
        let test_data = [
            (80.0, 180.0, 24.69, BmiCategory::NormalWeight),
            (95.0, 170.0, 32.87, BmiCategory::Obese),
        ];

        for (weight_kg, height_cm, expected_bmi, expected_category) in test_data {
            let bmi = body_mass_index(weight_kg, height_cm);
            assert_eq!(bmi, expected_bmi);
            assert_eq!(BmiCategory::from_bmi(bmi), expected_category);
        }
    }

    #[test]
    fn bmi_category_boundaries_are_left_closed() {
        assert_eq!(BmiCategory::from_bmi(18.49), BmiCategory::Underweight);
        assert_eq!(BmiCategory::from_bmi(18.5), BmiCategory::NormalWeight);
        assert_eq!(BmiCategory::from_bmi(24.99), BmiCategory::NormalWeight);
        assert_eq!(BmiCategory::from_bmi(25.0), BmiCategory::Overweight);
        assert_eq!(BmiCategory::from_bmi(29.99), BmiCategory::Overweight);
        assert_eq!(BmiCategory::from_bmi(30.0), BmiCategory::Obese);
    }

    #[test]
    fn validation_reports_every_violation() {
        let bad = input(0.0, 400.0, 12, Sex::Male);
        let violations = bad.validate().unwrap_err();
        assert_eq!(violations.len(), 3);

        assert!(input(80.0, 180.0, 25, Sex::Male).validate().is_ok());
        assert!(input(500.0, 300.0, 120, Sex::Female).validate().is_ok());
    }
}
