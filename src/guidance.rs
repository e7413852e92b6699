//! Advice text and personalised recommendations.
//!
//! All text is static. Nothing here influences probabilities or tiers.

use crate::assessment::Assessment;
use crate::config::RecommendationPolicy;
use crate::model::Condition;
use crate::record::RawRecord;
use crate::risk::RiskTier;

pub const ACADEMIC_RECOMMENDATIONS: [&str; 4] = [
    "Consider creating a structured study schedule",
    "Visit your academic advisor to discuss study strategies",
    "Make use of campus tutoring services",
    "Join study groups for collaborative learning",
];

pub const COUNSELLING_RECOMMENDATIONS: [&str; 4] = [
    "Schedule an appointment with the campus counseling center",
    "Practice daily relaxation techniques",
    "Maintain a regular sleep schedule",
    "Exercise regularly to reduce stress",
];

pub const WELLNESS_RECOMMENDATIONS: [&str; 4] = [
    "Stay connected with friends and family",
    "Take regular breaks during study sessions",
    "Practice mindfulness or meditation",
    "Maintain a balanced diet and stay hydrated",
];

/// Advice paragraph for one condition at one tier.
pub fn advice(condition: Condition, tier: RiskTier) -> &'static str {
    use Condition::*;
    use RiskTier::*;

    match (condition, tier) {
        (Depression, High) => {
            "You're showing signs that might be related to depression. This could be affecting \
             your daily activities and mood. While this isn't a diagnosis, it's important to speak \
             with a mental health professional who can provide proper evaluation and support."
        }
        (Depression, Moderate) => {
            "Some symptoms of depression might be present. This is common among students, \
             especially during stressful periods. Consider talking to a counselor about healthy \
             coping strategies."
        }
        (Depression, Low) => {
            "While some mild depressive symptoms might be present, they appear to be within a \
             manageable range. Continue practicing self-care and maintaining social connections."
        }
        (Depression, Minimal) => {
            "Your responses suggest minimal signs of depression. Keep up your positive mental \
             health practices!"
        }
        (Anxiety, High) => {
            "Your responses indicate significant anxiety levels that might be impacting your daily \
             life. This is common among students, but it's important to seek professional support \
             to develop effective coping strategies."
        }
        (Anxiety, Moderate) => {
            "You're showing moderate levels of anxiety. This is very common in academic settings, \
             but developing some additional coping strategies could be beneficial."
        }
        (Anxiety, Low) => {
            "Some mild anxiety is present, which is normal, especially during academic stress. \
             Consider learning some basic stress management techniques."
        }
        (Anxiety, Minimal) => {
            "Your anxiety levels appear to be well-managed. Continue your current stress \
             management practices!"
        }
        (PanicAttack, High) => {
            "Your responses suggest you might be experiencing symptoms that could lead to panic \
             attacks. While this can be frightening, there are effective treatments and coping \
             strategies available."
        }
        (PanicAttack, Moderate) => {
            "Some panic-related symptoms are present. Learning specific coping techniques could \
             help you manage these symptoms effectively."
        }
        (PanicAttack, Low) => {
            "Mild signs of panic-related symptoms are detected. These are manageable with proper \
             support and techniques."
        }
        (PanicAttack, Minimal) => {
            "Your responses suggest minimal risk of panic attacks. Continue your current wellness \
             practices!"
        }
    }
}

/// Full ordered recommendation list: academic, then counselling, then general
/// wellness. Callers show at most `policy.max_items` of them.
pub fn recommendations(
    assessment: &Assessment,
    record: &RawRecord,
    policy: &RecommendationPolicy,
) -> Vec<&'static str> {
    let mut out = Vec::with_capacity(12);
    if record.cgpa < policy.academic_cgpa_threshold {
        out.extend(ACADEMIC_RECOMMENDATIONS);
    }
    if assessment.max_tier().is_elevated() {
        out.extend(COUNSELLING_RECOMMENDATIONS);
    }
    out.extend(WELLNESS_RECOMMENDATIONS);
    out
}

/// The first `policy.max_items` recommendations.
pub fn top_recommendations(
    assessment: &Assessment,
    record: &RawRecord,
    policy: &RecommendationPolicy,
) -> Vec<&'static str> {
    let mut all = recommendations(assessment, record, policy);
    all.truncate(policy.max_items);
    all
}
