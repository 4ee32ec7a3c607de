//! Prompt templates sent to the text generator.
//!
//! The JSON layouts embedded here are the contract that [`crate::extract`]
//! and [`crate::insights`] parse against. Keep the field names in sync.

use crate::model::GenerationRequest;
use crate::statistics::ResultSummary;

/// Build the quiz generation prompt for a request.
pub fn quiz_prompt(request: &GenerationRequest) -> String {
    let question_types = request
        .question_types
        .iter()
        .map(|t| t.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    let custom = request
        .custom_prompt
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| format!("\nCustom Instructions: {s}\n"))
        .unwrap_or_default();

    format!(
        r#"You are an expert educational content creator. Generate a comprehensive quiz with the following specifications:

Subject: {subject}
Grade Level: {grade_level}
Topic: {topic}
Number of Questions: {count}
Difficulty Level: {difficulty}
Question Types: {question_types}
{custom}
Please generate the quiz in the following JSON format:
{{
    "title": "Quiz title here",
    "description": "Brief description of the quiz",
    "questions": [
        {{
            "question_text": "The question text here",
            "question_type": "multiple_choice|true_false|short_answer|essay",
            "options": ["Option A", "Option B", "Option C", "Option D"],
            "correct_answer": "The correct answer",
            "explanation": "Explanation of why this is correct",
            "points": 1,
            "difficulty_level": "easy|medium|hard"
        }}
    ]
}}

Include "options" only for multiple_choice questions.

Guidelines:
1. Make questions age-appropriate for {grade_level}
2. Ensure questions are clear and unambiguous
3. For multiple choice, provide 4 options with only one correct answer
4. For true/false, make statements clear and testable
5. For short answer, provide specific expected answers
6. For essay questions, provide clear evaluation criteria
7. Include explanations that help students learn
8. Vary difficulty levels appropriately
9. Ensure questions cover the topic comprehensively

Generate the quiz now:"#,
        subject = request.subject,
        grade_level = request.grade_level,
        topic = request.topic,
        count = request.question_count,
        difficulty = request.difficulty,
    )
}

/// Build the table-of-contents prompt for a subject.
pub fn table_of_contents_prompt(subject: &str, grade_level: &str) -> String {
    format!(
        r#"Generate a comprehensive table of contents for {subject} at {grade_level} level.

Return the response in the following JSON format:
{{
    "chapters": [
        {{
            "title": "Chapter Title",
            "description": "Chapter description",
            "order_index": 1,
            "topics": [
                {{
                    "title": "Topic Title",
                    "description": "Topic description",
                    "order_index": 1,
                    "subtopics": [
                        {{
                            "title": "Subtopic Title",
                            "description": "Subtopic description",
                            "order_index": 1
                        }}
                    ]
                }}
            ]
        }}
    ]
}}

Make it comprehensive and educationally appropriate for {grade_level}."#
    )
}

/// Build the performance analysis prompt over a set of graded results.
pub fn performance_analysis_prompt(results: &[ResultSummary]) -> String {
    // Serializing plain structs of numbers and strings cannot fail.
    let data = serde_json::to_string_pretty(results).unwrap_or_else(|_| "[]".to_string());

    format!(
        r#"Analyze the following quiz performance data and provide educational insights:

{data}

Provide analysis in the following JSON format:
{{
    "overall_performance": {{
        "average_score": 0.0,
        "completion_rate": 0.0,
        "common_weaknesses": ["weakness1", "weakness2"],
        "strengths": ["strength1", "strength2"]
    }},
    "recommendations": [
        "recommendation1",
        "recommendation2"
    ],
    "difficulty_analysis": {{
        "too_easy": ["question1", "question2"],
        "too_hard": ["question3", "question4"],
        "appropriate": ["question5", "question6"]
    }}
}}"#
    )
}
