//! Terminal rendering shared by the subcommands.

use colored::Colorize;
use pawmatch_application::MatchSummary;
use pawmatch_core::{CardVisuals, NameCandidate, Species};
use strum::IntoEnumIterator;

/// Species in menu order, numbered from 1.
fn species_list() -> Vec<Species> {
    Species::iter().collect()
}

pub fn title() {
    println!("\n{}", "PawMatch 🐾".bright_magenta().bold());
}

pub fn species_menu() {
    for (i, species) in species_list().iter().enumerate() {
        println!("  {}. {} {}", i + 1, species.emoji(), species.label());
    }
}

/// Parses a menu number or a species name.
pub fn parse_species(input: &str) -> Option<Species> {
    if let Ok(n) = input.trim().parse::<usize>() {
        return n.checked_sub(1).and_then(|i| species_list().get(i).copied());
    }
    input.parse().ok()
}

pub fn card(candidate: &NameCandidate, position: usize, total: usize) {
    println!();
    println!("{}", format!("── {position}/{total} ──").dimmed());
    println!("  {}", candidate.name.bold());
    println!("  {}", format!("\"{}\"", candidate.meaning).italic());
    if !candidate.tags.is_empty() {
        let tags: Vec<String> = candidate.tags.iter().map(|t| format!("#{t}")).collect();
        println!("  {}", tags.join(" ").magenta());
    }
}

/// "siguen: B, C · 3 por decidir" for a card stack whose first entry is on top.
fn stack_summary(stack: &[NameCandidate], remaining: usize) -> String {
    let next: Vec<&str> = stack.iter().skip(1).map(|c| c.name.as_str()).collect();
    if next.is_empty() {
        format!("última tarjeta · {remaining} por decidir")
    } else {
        format!("siguen: {} · {remaining} por decidir", next.join(", "))
    }
}

pub fn card_stack(stack: &[NameCandidate], remaining: usize) {
    println!("  {}", stack_summary(stack, remaining).dimmed());
}

pub fn drag_feedback(visuals: &CardVisuals) {
    let stamp = if visuals.accept_visible {
        "SÍ".green().bold().to_string()
    } else if visuals.reject_visible {
        "NO".red().bold().to_string()
    } else {
        String::new()
    };
    println!(
        "  {} {:+.0}px  giro {:+.1}°  opacidad {:.2} {}",
        "↔".dimmed(),
        visuals.offset,
        visuals.rotation,
        visuals.opacity,
        stamp
    );
}

pub fn matches(matches: &[MatchSummary], friends: usize) {
    if friends == 0 {
        println!("{}", "Añade los votos de tus amigos para ver las coincidencias.".dimmed());
        return;
    }
    println!("{} {}", "Amigos añadidos:".dimmed(), friends);
    if matches.is_empty() {
        println!("{}", "Aún no hay coincidencias.".yellow());
        return;
    }
    println!("{}", "¡Coincidencias!".bright_green().bold());
    for m in matches {
        println!(
            "  {} {} {}",
            format!("{:>2}♥", m.votes).red(),
            m.candidate.name.bold(),
            format!("- {}", m.candidate.meaning).dimmed()
        );
    }
}

pub fn code_block(label: &str, token: &str) {
    println!("{}", label.cyan());
    println!("{}", token);
}

pub fn error(message: &str) {
    println!("{} {}", "✗".red(), message.red());
}

pub fn info(message: &str) {
    println!("{} {}", "✓".green(), message);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_species_by_number_and_name() {
        assert_eq!(parse_species("1"), Some(Species::Dog));
        assert_eq!(parse_species("7"), Some(Species::Other));
        assert_eq!(parse_species("0"), None);
        assert_eq!(parse_species("8"), None);
        assert_eq!(parse_species("conejo"), Some(Species::Rabbit));
    }

    fn named(name: &str) -> NameCandidate {
        NameCandidate {
            id: format!("id-{name}"),
            name: name.to_string(),
            meaning: String::new(),
            tags: Vec::new(),
        }
    }

    #[test]
    fn test_stack_summary_lists_cards_behind_the_top_one() {
        let stack = [named("A"), named("B"), named("C")];
        assert_eq!(stack_summary(&stack, 3), "siguen: B, C · 3 por decidir");
        assert_eq!(stack_summary(&stack[..1], 1), "última tarjeta · 1 por decidir");
    }
}
