//! Course endpoints (/api/courses/)

use anyhow::{Context, Result};
use serde_json::json;

use super::YonnaClient;
use crate::models::{Course, ListResponse};

fn print_course(course: &Course) {
    println!("{} (#{})", course.title, course.id);
    if let Some(level) = &course.level {
        println!("  Level:   {}", level);
    }
    println!("  Sabedor: {}", course.teacher_name());
    if let Some(desc) = &course.description {
        if !desc.trim().is_empty() {
            println!("  {}", desc.trim());
        }
    }
}

/// List courses available for the learner's level.
pub async fn list_courses() -> Result<()> {
    let client = YonnaClient::new()?;
    let courses = client
        .get_json::<ListResponse<Course>>("/api/courses/available/")
        .await?
        .into_results();

    println!("\nAvailable Courses:");
    println!("{:-<60}", "");
    if courses.is_empty() {
        println!("  (no courses for your level yet)");
        return Ok(());
    }
    for course in &courses {
        print_course(course);
        println!();
    }
    Ok(())
}

/// Show one course with its lessons.
pub async fn show_course(id: u64) -> Result<()> {
    let client = YonnaClient::new()?;
    let course: Course = client
        .get_json(&format!("/api/courses/{}/", id))
        .await?;

    println!();
    print_course(&course);
    if let Some(lessons) = &course.lessons {
        println!("  Lessons:");
        for lesson in lessons {
            println!("    {:>3}. {}", lesson.order.unwrap_or_default(), lesson.title);
        }
    }
    Ok(())
}

/// Create a course (teachers only).
pub async fn create_course(
    title: &str,
    description: Option<&str>,
    level: Option<&str>,
) -> Result<()> {
    let client = YonnaClient::new()?;
    let course: Course = client
        .post_json(
            "/api/courses/create/",
            json!({
                "title": title,
                "description": description.unwrap_or(""),
                "level": level.unwrap_or("beginner"),
            }),
        )
        .await
        .context("Course creation failed")?;
    println!("Created course '{}' (#{}).", course.title, course.id);
    Ok(())
}

/// Enroll the current user in a course.
pub async fn enroll(course_id: u64) -> Result<()> {
    let client = YonnaClient::new()?;
    client
        .send(
            super::request::ApiRequest::post("/api/courses/enroll/")
                .json(json!({ "course_id": course_id })),
        )
        .await
        .context("Enrollment failed")?;
    println!("Enrolled in course #{}.", course_id);
    Ok(())
}
