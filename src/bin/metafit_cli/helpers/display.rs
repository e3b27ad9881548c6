// ABOUTME: Output formatting helpers for the metafit CLI
// ABOUTME: Consistent terminal rendering of profiles, progress, plans, recipes, and exercises
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Metafit

use metafit_client::intelligence::HistoryEntry;
use metafit_client::models::{DailyPlan, Exercise, Meal, User};
use metafit_client::services::{Dashboard, ProgressReport};

const RULE_WIDTH: usize = 50;

fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

/// Text progress bar, e.g. `[#####-----]`
fn bar(percent: f64) -> String {
    const WIDTH: usize = 20;
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * WIDTH as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(WIDTH - filled))
}

pub fn display_user(user: &User) {
    println!("{}", user.display_name());
    println!("{}", rule());
    println!("   Email:         {}", user.email);
    println!("   Age:           {} years", user.age);
    println!("   Weight:        {:.1} kg", user.weight);
    println!("   Height:        {:.0} cm", user.height);
    println!("   Target weight: {:.1} kg", user.target_weight);
    if let Some(created) = user.created_at {
        println!("   Member since:  {}", created.format("%Y-%m-%d"));
    }
}

pub fn display_progress(report: &ProgressReport) {
    println!("Goal progress");
    println!("{}", rule());
    println!("   {} {:.0}%", bar(report.percent), report.percent);
    println!("   {}", report.description);
    println!(
        "   Start {:.1} kg  ->  now {:.1} kg  ->  goal {:.1} kg",
        report.initial_weight, report.current_weight, report.target_weight
    );
    if report.remaining_kg.abs() >= 0.05 {
        let verb = if report.remaining_kg > 0.0 { "lose" } else { "gain" };
        println!("   {:.1} kg left to {verb}", report.remaining_kg.abs());
    }
    match (report.bmi, report.bmi_category) {
        (Some(bmi), Some(category)) => println!("   BMI {bmi:.1} ({category})"),
        _ => println!("   BMI unavailable"),
    }
}

pub fn display_history(entries: &[HistoryEntry]) {
    if entries.is_empty() {
        println!("No weight records yet.");
        return;
    }
    println!("\nHistory");
    println!("{}", rule());
    for entry in entries {
        let change = entry
            .change_from_previous
            .map_or_else(String::new, |kg| format!("  ({kg:+.1} kg)"));
        println!(
            "   {}  {:.1} kg{change}",
            entry.record.date.format("%Y-%m-%d"),
            entry.record.weight
        );
    }
}

pub fn display_plan(plan: &DailyPlan) {
    let day = plan
        .day()
        .map_or_else(|| plan.date.clone(), |day| day.format("%A %d %B %Y").to_string());
    println!("Plan for {day}");
    println!("{}", rule());
    for (slot, meal) in plan.meals.in_order() {
        let category = meal.category.as_deref().unwrap_or("");
        println!("   {slot:<10} {:<32} {:>5.0} kcal  {category}", meal.name, meal.calories);
    }
    if plan.exercises.is_empty() {
        println!("   No exercises scheduled");
    } else {
        println!("   Exercises ({} min):", plan.exercise_minutes());
        for exercise in &plan.exercises {
            println!(
                "     - {} ({} min, {:.0} kcal)",
                exercise.name, exercise.duration, exercise.calories_burned
            );
        }
    }
    println!("   Net energy: {:.0} kcal", plan.net_calories());
}

pub fn display_plans(plans: &[DailyPlan]) {
    if plans.is_empty() {
        println!("No plans found.");
        return;
    }
    for (index, plan) in plans.iter().enumerate() {
        if index > 0 {
            println!();
        }
        display_plan(plan);
    }
}

pub fn display_recipes(meals: &[Meal]) {
    if meals.is_empty() {
        println!("No recipes match.");
        return;
    }
    println!("{} recipe(s)", meals.len());
    println!("{}", rule());
    for meal in meals {
        println!("   {} [{}]", meal.name, meal.category.label());
        println!(
            "      {:.0} kcal | P {:.0} g | C {:.0} g | F {:.0} g",
            meal.calories, meal.protein, meal.carbs, meal.fat
        );
        if !meal.ingredients.is_empty() {
            println!("      {}", meal.ingredients.join(", "));
        }
    }
}

pub fn display_exercises(exercises: &[Exercise]) {
    if exercises.is_empty() {
        println!("No exercises found.");
        return;
    }
    println!("{} exercise(s)", exercises.len());
    println!("{}", rule());
    for exercise in exercises {
        let difficulty = exercise.difficulty.as_deref().unwrap_or("-");
        println!(
            "   {:<30} {:>3} min  {:>5.0} kcal  {difficulty}",
            exercise.name, exercise.duration, exercise.calories_burned
        );
    }
}

pub fn display_dashboard(dashboard: &Dashboard) {
    println!("Hello, {}!", dashboard.user.display_name());
    println!();
    display_progress(&dashboard.progress);
    println!();
    match &dashboard.todays_plan {
        Some(plan) => display_plan(plan),
        None => println!("No plan for today. Try `metafit plan generate`."),
    }
    println!();
    println!(
        "Catalog: {} recipes, {} exercises, {} plans, {} weight records",
        dashboard.meals.len(),
        dashboard.exercises.len(),
        dashboard.plans.len(),
        dashboard.weight_history.len()
    );
}
