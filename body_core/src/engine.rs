//! Derived health metrics computed from the measurement record.
//!
//! Every field accessor follows the same contract: return the cached
//! value when the record already holds it, otherwise solicit one line of
//! raw text per sub-value through the [`Prompt`] boundary, validate,
//! convert units, cache, and return. A validation failure aborts the
//! current metric without caching anything for the failing field.
//!
//! Metric output goes through the [`ReportSink`] boundary as
//! human-readable lines; the core does not dictate how they are shown.

use crate::category::{classify, fat_category, WEIGHT_LABELS};
use crate::{fields, Circumference, RecordStore, Result, Skinfold, ACTIVITY_LEVELS};

/// Caller-facing input boundary: one line of raw text per prompt
pub trait Prompt {
    fn ask(&mut self, prompt: &str) -> Result<String>;
}

/// Sink for human-readable metric report lines
pub trait ReportSink {
    fn emit(&mut self, line: &str);
}

/// BMI category bounds against [`WEIGHT_LABELS`]
const BMI_BOUNDS: [f64; 3] = [18.5, 25.0, 30.0];

/// Daily-requirement multipliers indexed by the activity level
const ACTIVITY_MULTIPLIERS: [f64; 5] = [1.2, 1.375, 1.55, 1.725, 1.9];

/// Computes derived metrics against a record store, soliciting missing
/// fields through the prompt boundary
pub struct Engine<'a> {
    store: &'a mut RecordStore,
    prompt: &'a mut dyn Prompt,
    report: &'a mut dyn ReportSink,
    rounding: usize,
}

impl<'a> Engine<'a> {
    pub fn new(
        store: &'a mut RecordStore,
        prompt: &'a mut dyn Prompt,
        report: &'a mut dyn ReportSink,
        rounding: usize,
    ) -> Self {
        Self {
            store,
            prompt,
            report,
            rounding,
        }
    }

    fn display(&self, value: f64) -> String {
        format!("{:.*}", self.rounding, value)
    }

    // ------------------------------------------------------------------
    // Field accessors
    // ------------------------------------------------------------------

    fn require_height(&mut self) -> Result<f64> {
        if let Some(height) = self.store.record().height {
            return Ok(height);
        }
        let raw = self.prompt.ask("Height (ft'in\"): ")?;
        let height = fields::parse_height(&raw)?;
        self.store.record_mut().height = Some(height);
        Ok(height)
    }

    fn require_weight(&mut self) -> Result<f64> {
        if let Some(weight) = self.store.record().weight {
            return Ok(weight);
        }
        let raw = self.prompt.ask("Weight (lb): ")?;
        let weight = fields::parse_weight(&raw)?;
        self.store.record_mut().weight = Some(weight);
        Ok(weight)
    }

    fn require_gender(&mut self) -> Result<bool> {
        if let Some(gender) = self.store.record().gender {
            return Ok(gender);
        }
        let raw = self.prompt.ask("Gender (m/f): ")?;
        let gender = fields::parse_gender(&raw)?;
        self.store.record_mut().gender = Some(gender);
        Ok(gender)
    }

    fn require_age(&mut self) -> Result<u32> {
        if let Some(age) = self.store.record().age {
            return Ok(age);
        }
        let raw = self.prompt.ask("Age (years): ")?;
        let age = fields::parse_age(&raw)?;
        self.store.record_mut().age = Some(age);
        Ok(age)
    }

    fn require_activity(&mut self) -> Result<u8> {
        if let Some(activity) = self.store.record().activity {
            return Ok(activity);
        }
        let mut prompt = String::new();
        for (index, level) in ACTIVITY_LEVELS.iter().enumerate() {
            prompt.push_str(&format!("{}. {}\n", index, level));
        }
        prompt.push_str("Activity level: ");
        let raw = self.prompt.ask(&prompt)?;
        let activity = fields::parse_activity(&raw)?;
        self.store.record_mut().activity = Some(activity);
        Ok(activity)
    }

    /// All three circumferences are collected before any validation, and
    /// the sub-record is cached whole or not at all.
    fn require_circumference(&mut self) -> Result<Circumference> {
        if let Some(circumference) = self.store.record().circumference {
            return Ok(circumference);
        }
        let neck = self.prompt.ask("Neck circumference (cm): ")?;
        let waist = self.prompt.ask("Waist circumference (cm): ")?;
        let hip = self.prompt.ask("Hip circumference (cm): ")?;

        let circumference = Circumference {
            neck: fields::parse_measurement(&neck, "circumference")?,
            waist: fields::parse_measurement(&waist, "circumference")?,
            hip: fields::parse_measurement(&hip, "circumference")?,
        };
        self.store.record_mut().circumference = Some(circumference);
        Ok(circumference)
    }

    /// Same all-or-nothing caching rule as circumferences.
    fn require_skinfold(&mut self) -> Result<Skinfold> {
        if let Some(skinfold) = self.store.record().skinfold {
            return Ok(skinfold);
        }
        let abdominal = self.prompt.ask("Abdominal skinfold (mm): ")?;
        let suprailiac = self.prompt.ask("Suprailiac skinfold (mm): ")?;
        let tricep = self.prompt.ask("Tricep skinfold (mm): ")?;
        let thigh = self.prompt.ask("Thigh skinfold (mm): ")?;

        let skinfold = Skinfold {
            abdominal: fields::parse_measurement(&abdominal, "skinfold")?,
            suprailiac: fields::parse_measurement(&suprailiac, "skinfold")?,
            tricep: fields::parse_measurement(&tricep, "skinfold")?,
            thigh: fields::parse_measurement(&thigh, "skinfold")?,
        };
        self.store.record_mut().skinfold = Some(skinfold);
        Ok(skinfold)
    }

    // ------------------------------------------------------------------
    // Metrics
    // ------------------------------------------------------------------

    /// Body mass index
    pub fn bmi(&mut self) -> Result<()> {
        let height = self.require_height()?;
        let weight = self.require_weight()?;

        let bmi = bmi_value(weight, height);
        tracing::info!("Computed BMI {:.4}", bmi);

        self.report
            .emit(&format!("Body Mass Index: {}", self.display(bmi)));
        self.report.emit(&format!(
            "Category: {}",
            classify(bmi, &BMI_BOUNDS, &WEIGHT_LABELS)
        ));
        Ok(())
    }

    /// Body adiposity index, categorized by gender-specific age bands
    pub fn bai(&mut self) -> Result<()> {
        let height = self.require_height()?;
        let gender = self.require_gender()?;
        let age = self.require_age()?;
        let hip = self.require_circumference()?.hip;

        let bai = bai_value(hip, height);
        tracing::info!("Computed BAI {:.4}", bai);

        self.report
            .emit(&format!("Body Adiposity Index: {}", self.display(bai)));

        if !(20..80).contains(&age) {
            self.report
                .emit(&format!("Age {} is out of category bounds.", age));
            return Ok(());
        }

        let bounds = bai_bounds(gender, age);
        self.report.emit(&format!(
            "Category: {}",
            classify(bai, &bounds, &WEIGHT_LABELS)
        ));
        Ok(())
    }

    /// Basal metabolic rate and daily kcal requirement (Mifflin-St Jeor)
    pub fn bmr(&mut self) -> Result<()> {
        self.report.emit("Method: Mifflin-St Jeor");
        let height = self.require_height()?;
        let weight = self.require_weight()?;
        let gender = self.require_gender()?;
        let age = self.require_age()?;
        let activity = self.require_activity()?;

        let base = bmr_base(weight, height, gender, age);
        let kcal = base * ACTIVITY_MULTIPLIERS[usize::from(activity)];
        tracing::info!("Computed BMR base {:.4}, daily {:.4}", base, kcal);

        self.report
            .emit(&format!("Basal Metabolic Rate: {}", self.display(base)));
        self.report
            .emit(&format!("Daily kcal requirement: {}", self.display(kcal)));
        Ok(())
    }

    /// Body fat percent from tape measurements (US Navy method)
    pub fn tape(&mut self) -> Result<()> {
        self.report.emit("Method: US Navy");
        let height = self.require_height()?;
        let gender = self.require_gender()?;
        let circumference = self.require_circumference()?;

        let fat_percent = navy_fat_percent(height, gender, circumference)?;
        tracing::info!("Computed tape fat percent {:.4}", fat_percent);

        self.report
            .emit(&format!("Body Fat Percent: {}", self.display(fat_percent)));
        self.report
            .emit(&format!("Category: {}", fat_category(fat_percent, gender)));
        Ok(())
    }

    /// Body fat percent from caliper measurements (Jackson-Pollock 4-site)
    pub fn calipers(&mut self) -> Result<()> {
        self.report.emit("Method: Jackson-Pollock 4-site");
        let gender = self.require_gender()?;
        let age = self.require_age()?;
        let skinfold = self.require_skinfold()?;

        let fat_percent = jackson_pollock_fat_percent(gender, age, skinfold);
        tracing::info!("Computed caliper fat percent {:.4}", fat_percent);

        self.report
            .emit(&format!("Body Fat Percent: {}", self.display(fat_percent)));
        self.report
            .emit(&format!("Category: {}", fat_category(fat_percent, gender)));
        Ok(())
    }

    /// Empty the record and report success
    pub fn reset(&mut self) {
        self.store.clear();
        self.report.emit("All user data has been reset.");
    }
}

// ----------------------------------------------------------------------
// Pure formulas
// ----------------------------------------------------------------------

/// `10000 × weight / height²` with weight in kg and height in cm
pub fn bmi_value(weight_kg: f64, height_cm: f64) -> f64 {
    10_000.0 * weight_kg / (height_cm * height_cm)
}

/// `1000 × hip / height^1.5 − 18` with hip and height in cm
pub fn bai_value(hip_cm: u32, height_cm: f64) -> f64 {
    1_000.0 * f64::from(hip_cm) / (height_cm * height_cm.sqrt()) - 18.0
}

/// Category bounds for the BAI: the first age band whose upper bound
/// exceeds the age, so ages 40 and 60 fall into the band above them.
fn bai_bounds(male: bool, age: u32) -> [f64; 3] {
    if age < 40 {
        if male {
            [8.0, 21.0, 26.0]
        } else {
            [21.0, 33.0, 39.0]
        }
    } else if age < 60 {
        if male {
            [11.0, 23.0, 29.0]
        } else {
            [23.0, 35.0, 41.0]
        }
    } else if male {
        [13.0, 25.0, 31.0]
    } else {
        [25.0, 38.0, 43.0]
    }
}

/// Mifflin-St Jeor base rate: `10w + 6.25h − 5a + (5 male | −161)`
pub fn bmr_base(weight_kg: f64, height_cm: f64, male: bool, age: u32) -> f64 {
    10.0 * weight_kg + 6.25 * height_cm - 5.0 * f64::from(age) + if male { 5.0 } else { -161.0 }
}

/// US Navy fat estimate from girth measurements.
///
/// The log term uses `waist − neck` for men and `waist − neck + hip` for
/// women; a non-positive difference cannot be computed and is reported as
/// a recoverable metric error.
pub fn navy_fat_percent(height_cm: f64, male: bool, c: Circumference) -> Result<f64> {
    let girth = i64::from(c.waist) - i64::from(c.neck) + if male { 0 } else { i64::from(c.hip) };
    if girth <= 0 {
        return Err(crate::Error::Metric(format!(
            "girth term {} cm is not positive; waist must exceed neck",
            girth
        )));
    }

    let coefficients: [f64; 3] = if male {
        [1.0324, -0.19077, 0.15456]
    } else {
        [1.29579, -0.35004, 0.221]
    };
    let values = [1.0, (girth as f64).log10(), height_cm.log10()];
    let denominator: f64 = coefficients
        .iter()
        .zip(values.iter())
        .map(|(c, v)| c * v)
        .sum();

    Ok(495.0 / denominator - 450.0)
}

/// Jackson-Pollock 4-site fat estimate from the skinfold sum
pub fn jackson_pollock_fat_percent(male: bool, age: u32, skinfold: Skinfold) -> f64 {
    let sum = f64::from(skinfold.total());
    let coefficients: [f64; 4] = if male {
        [0.29288, -0.0005, 0.15845, -5.76377]
    } else {
        [0.29669, -0.00043, 0.02963, 1.4072]
    };
    let values = [sum, sum * sum, f64::from(age), 1.0];
    coefficients
        .iter()
        .zip(values.iter())
        .map(|(c, v)| c * v)
        .sum()
}
