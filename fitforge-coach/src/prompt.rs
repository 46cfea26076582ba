//! Prompt assembly for the coaching endpoints. Everything here is pure
//! string work, kept apart from the HTTP client so it can be tested
//! without the network.

use chrono::{DateTime, Utc};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use fitforge_model::{measurement::Measurement, profile::Profile};

/// How many turns of supplied conversation history are replayed to the model.
const HISTORY_WINDOW: usize = 5;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// "user" or "assistant".
    pub role: String,
    pub content: String,
    pub timestamp: Option<DateTime<Utc>>,
}

/// Snapshot of what we know about the user, rendered into the prompts.
#[derive(Debug, Default)]
pub struct UserContext {
    pub profile: Option<Profile>,
    pub latest_measurement: Option<Measurement>,
    pub recent_workout_count: usize,
    pub recent_meal_count: usize,
}

impl UserContext {
    pub fn render(&self) -> String {
        let mut lines = Vec::new();

        if let Some(profile) = &self.profile {
            lines.push("User Profile:".to_owned());
            if let Some(age) = profile.age {
                lines.push(format!("- Age: {age} years old"));
            }
            if let Some(sex) = profile.sex {
                lines.push(format!("- Sex: {sex}"));
            }
            if let Some(height_cm) = profile.height_cm {
                lines.push(format!("- Height: {height_cm} cm"));
            }
            if let Some(weight_kg) = profile.current_weight_kg {
                lines.push(format!("- Current Weight: {weight_kg} kg"));
            }
            if let Some(target_kg) = profile.target_weight_kg {
                lines.push(format!("- Target Weight: {target_kg} kg"));
            }
            if let Some(level) = profile.activity_level {
                lines.push(format!("- Activity Level: {level}"));
            }
            if let Some(goal) = profile.fitness_goal {
                lines.push(format!("- Fitness Goal: {goal}"));
            }
        }

        if let Some(measurement) = &self.latest_measurement {
            lines.push("\nLatest Measurement:".to_owned());
            lines.push(format!("- Weight: {} kg", measurement.weight_kg));
            if let Some(body_fat_pct) = measurement.body_fat_pct {
                lines.push(format!("- Body Fat: {body_fat_pct}%"));
            }
        }

        if self.recent_workout_count > 0 {
            lines.push(format!(
                "\nRecent Workouts: {} workouts logged",
                self.recent_workout_count
            ));
        }
        if self.recent_meal_count > 0 {
            lines.push(format!(
                "Recent Nutrition: {} meals logged",
                self.recent_meal_count
            ));
        }

        lines.join("\n")
    }
}

/// Full chat prompt: coaching system prompt, the trailing window of the
/// conversation, then the current message.
pub fn chat_prompt(context: &UserContext, history: &[ChatMessage], message: &str) -> String {
    let system_prompt = format!(
        "You are an expert AI fitness coach. Your role is to provide:
- Personalized fitness advice
- Nutrition guidance
- Motivation and support
- Workout recommendations
- Progress tracking insights

You are encouraging, knowledgeable, and focus on sustainable, healthy practices.
Never recommend extreme diets or unsafe exercises.

Here is the user's information:
{}

Provide helpful, actionable advice based on their goals and current situation.
Keep responses concise but informative (2-4 paragraphs max).",
        context.render()
    );

    let mut parts = vec![system_prompt];
    let skip = history.len().saturating_sub(HISTORY_WINDOW);
    for turn in &history[skip..] {
        let prefix = if turn.role == "user" { "User" } else { "Coach" };
        parts.push(format!("{}: {}", prefix, turn.content));
    }
    parts.push(format!("User: {message}"));

    parts.join("\n\n")
}

/// Prompt for a multi-week workout plan.
pub fn workout_plan_prompt(
    context: &UserContext,
    goal: &str,
    experience_level: &str,
    days_per_week: u8,
    equipment: &[String],
    duration_minutes: u32,
) -> String {
    let equipment_str = if equipment.is_empty() {
        "bodyweight only".to_owned()
    } else {
        equipment.iter().join(", ")
    };

    format!(
        "Create a detailed {days_per_week}-day per week workout plan with the following specifications:

User Context:
{}

Plan Requirements:
- Goal: {goal}
- Experience Level: {experience_level}
- Equipment Available: {equipment_str}
- Session Duration: {duration_minutes} minutes per workout
- Days per Week: {days_per_week}

Please provide:
1. A plan name
2. Brief description (2-3 sentences)
3. Recommended duration (weeks)
4. Detailed workout structure for each day, including:
   - Exercise names
   - Sets and reps (or duration for cardio)
   - Brief form tips
   - Rest periods

Format the response as a structured plan that's easy to follow.
Focus on progressive overload and sustainability.",
        context.render()
    )
}

/// Prompt for a single structured workout suggestion the client can save
/// directly. The model is told to reply with bare JSON.
pub fn workout_suggestion_prompt(context: &UserContext, message: &str) -> String {
    format!(
        "You are an expert fitness coach. The user is asking for a workout suggestion.

User Context:
{}

User Request:
{message}

Generate a workout with 4-8 exercises that matches their request. Return your response as a JSON object with this exact structure:

{{
  \"workout_name\": \"Name of the workout (e.g., 'Upper Body Strength')\",
  \"description\": \"Brief 1-2 sentence description of the workout\",
  \"exercises\": [
    {{
      \"exercise_name\": \"Exercise name\",
      \"exercise_type\": \"strength\",
      \"sets\": 3,
      \"reps\": 10,
      \"weight_kg\": null,
      \"notes\": \"Brief form tip or instruction\"
    }}
  ],
  \"duration_minutes\": 45,
  \"notes\": \"Any additional tips for the workout\"
}}

Rules:
- exercise_type must be one of: \"strength\", \"cardio\", \"flexibility\", \"sports\"
- For strength exercises: include sets and reps, leave weight_kg as null (user will fill in)
- For cardio: include duration_minutes in the exercise, leave sets/reps as null
- Include 4-8 exercises total
- Base recommendations on their fitness goal and experience level
- Make it practical and effective
- Return ONLY the JSON, no other text",
        context.render()
    )
}

/// Strip a ``` or ```json fence from a model reply, returning the text the
/// JSON parser should see. Replies without a fence come back trimmed.
pub fn json_candidate(reply: &str) -> &str {
    let trimmed = reply.trim();

    if let Some(fence_start) = trimmed.find("```") {
        let after_fence = &trimmed[fence_start + 3..];
        let body = after_fence.strip_prefix("json").unwrap_or(after_fence);
        match body.find("```") {
            Some(fence_end) => body[..fence_end].trim(),
            None => body.trim(),
        }
    } else {
        trimmed
    }
}

/// Pull a JSON object out of a model reply, tolerating a ``` or ```json
/// fenced block around it.
pub fn extract_json(reply: &str) -> Option<serde_json::Value> {
    serde_json::from_str(json_candidate(reply)).ok()
}
