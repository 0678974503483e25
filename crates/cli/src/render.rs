//! Terminal rendering of session views.

use colored::Colorize;
use domain::Recipe;
use session::View;

/// Print the error banner (if any) followed by the view.
pub fn render(view: View<'_>, error: Option<&str>) {
    if let Some(message) = error {
        println!("{} {}", "⚠".yellow().bold(), message.yellow());
    }

    match view {
        View::Splash => {
            println!("{}", "🍳 Fridge Chef".bold());
            println!("Today's meal from what's already in your fridge.");
        }
        View::UploadPrompt => {
            println!("📷 Upload a photo of your fridge to get started.");
        }
        View::Loading => {
            println!("{}", "🥕 Analyzing ingredients...".cyan());
        }
        View::Preview(image) => {
            println!(
                "{} {} ({} bytes, {})",
                "Photo:".bold(),
                image.name,
                image.size(),
                image.mime
            );
        }
        View::Results {
            ingredients,
            recipes,
        } => {
            print_ingredients(ingredients);
            println!();
            print_recipe_cards(recipes);
        }
        View::Detail(recipe) => print_recipe_detail(recipe),
    }
}

pub fn print_ingredients(ingredients: &[String]) {
    println!("{}", "🌟 Recognized ingredients".bold().blue());
    for ingredient in ingredients {
        println!("  {} {}", "•".green(), ingredient);
    }
}

/// One card per recipe, ranked as received.
pub fn print_recipe_cards(recipes: &[Recipe]) {
    println!("{}", "🔍 Recommended recipes".bold().blue());
    for (idx, recipe) in recipes.iter().enumerate() {
        println!("{}. 『{}』", (idx + 1).to_string().green(), recipe.name.bold());
        println!(
            "   ⏱ {} min | 🔥 difficulty {}",
            recipe.time,
            recipe.difficulty_level()
        );
        if !recipe.ingredients.is_empty() {
            println!("   🥣 {}", recipe.card_ingredients());
        }
    }
}

pub fn print_recipe_detail(recipe: &Recipe) {
    println!("{}", recipe.name.bold().blue());
    if let Some(summary) = &recipe.summary {
        println!("{}", summary.italic());
    }
    println!("{} {} min", "⏱ Time:".bold(), recipe.time);
    println!("{} {}", "🔥 Difficulty:".bold(), recipe.difficulty_level());

    println!("{}", "🥣 Ingredients:".bold());
    for ingredient in &recipe.ingredients {
        println!("  {} {}", "•".green(), ingredient);
    }

    println!("{}", "🍳 Steps:".bold());
    for (idx, step) in recipe.steps.iter().enumerate() {
        println!("  {}. {}", idx + 1, step);
    }
}
