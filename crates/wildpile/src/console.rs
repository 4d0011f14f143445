//! A line-oriented console prompt — the boundary implementation of
//! [`TurnPrompt`] the binary uses for human play.

use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use wildpile_player::{TableView, TurnChoice, TurnPrompt};
use wildpile_protocol::CardColor;

/// Reads turn choices from stdin:
///
/// ```text
/// d            draw
/// s            skip
/// p 3          play the card at index 3
/// p 3 g        play index 3, choosing green (for wilds)
/// ```
pub struct ConsolePrompt {
    lines: Lines<BufReader<Stdin>>,
}

impl ConsolePrompt {
    pub fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }
}

impl Default for ConsolePrompt {
    fn default() -> Self {
        Self::new()
    }
}

impl TurnPrompt for ConsolePrompt {
    async fn choose(&mut self, view: &TableView<'_>) -> TurnChoice {
        loop {
            println!("your turn — hand {}", view.hand);
            println!("(d)raw {}, (s)kip, or (p)lay <index> [r|y|g|b]:", view.pending_draws);
            match self.lines.next_line().await {
                Ok(Some(line)) => match parse_choice(line.trim()) {
                    Some(choice) => return choice,
                    None => println!("could not read that, try again"),
                },
                // Stdin gone: keep the game moving.
                Ok(None) | Err(_) => return TurnChoice::Draw,
            }
        }
    }

    fn rejected(&mut self, reason: &str) {
        println!("rejected: {reason}");
    }

    fn observe(&mut self, view: &TableView<'_>) {
        println!("{view}");
    }
}

fn parse_choice(input: &str) -> Option<TurnChoice> {
    let mut parts = input.split_whitespace();
    match parts.next()? {
        "d" | "D" => Some(TurnChoice::Draw),
        "s" | "S" => Some(TurnChoice::Skip),
        "p" | "P" => {
            let index: usize = parts.next()?.parse().ok()?;
            let color = match parts.next() {
                Some(c) => Some(parse_color(c)?),
                None => None,
            };
            Some(TurnChoice::Play { index, color })
        }
        _ => None,
    }
}

fn parse_color(input: &str) -> Option<CardColor> {
    match input {
        "r" | "R" => Some(CardColor::Red),
        "y" | "Y" => Some(CardColor::Yellow),
        "g" | "G" => Some(CardColor::Green),
        "b" | "B" => Some(CardColor::Blue),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_draw_and_skip() {
        assert_eq!(parse_choice("d"), Some(TurnChoice::Draw));
        assert_eq!(parse_choice("S"), Some(TurnChoice::Skip));
    }

    #[test]
    fn test_parse_play_with_and_without_color() {
        assert_eq!(
            parse_choice("p 3"),
            Some(TurnChoice::Play { index: 3, color: None })
        );
        assert_eq!(
            parse_choice("p 0 g"),
            Some(TurnChoice::Play {
                index: 0,
                color: Some(CardColor::Green)
            })
        );
    }

    #[test]
    fn test_parse_garbage_is_none() {
        assert_eq!(parse_choice(""), None);
        assert_eq!(parse_choice("x"), None);
        assert_eq!(parse_choice("p"), None);
        assert_eq!(parse_choice("p abc"), None);
        assert_eq!(parse_choice("p 1 purple"), None);
    }
}
