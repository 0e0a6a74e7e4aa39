//! Choosing one route among several with the same number.
//!
//! Route numbers are not unique within a city (a number can be shared by
//! a day route and a night route, for instance). Picking one is a pure
//! decision over the candidates; how the answer is obtained is up to the
//! [`RouteChooser`].

use std::io::{BufRead, Write};

use tracing::warn;

use crate::domain::RouteRecord;

/// Something that can pick one route from a list.
pub trait RouteChooser {
    /// Return the index of the chosen candidate, or `None` to cancel.
    ///
    /// Only called with two or more candidates.
    fn choose(&mut self, candidates: &[RouteRecord]) -> Option<usize>;
}

/// The result of [`choose_one`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice {
    Chosen(RouteRecord),
    Cancelled,
    /// There was nothing to choose from.
    NoCandidates,
}

/// Reduce `candidates` to one route.
///
/// A single candidate is chosen without consulting `chooser`. An index the
/// chooser returns out of range counts as a cancellation.
pub fn choose_one<C: RouteChooser + ?Sized>(
    mut candidates: Vec<RouteRecord>,
    chooser: &mut C,
) -> Choice {
    match candidates.len() {
        0 => Choice::NoCandidates,
        1 => Choice::Chosen(candidates.remove(0)),
        len => match chooser.choose(&candidates) {
            Some(i) if i < len => Choice::Chosen(candidates.swap_remove(i)),
            Some(i) => {
                warn!(index = i, candidates = len, "chooser returned an invalid index");
                Choice::Cancelled
            }
            None => Choice::Cancelled,
        },
    }
}

/// Chooses by listing the candidates and reading a number.
///
/// Candidates are numbered from 1. Anything that is not a listed number is
/// rejected and asked for again; an empty line or end of input cancels.
pub struct ConsoleChooser<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> ConsoleChooser<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn ask(&mut self, candidates: &[RouteRecord]) -> std::io::Result<Option<usize>> {
        let Some(first) = candidates.first() else {
            return Ok(None);
        };
        writeln!(
            self.output,
            "'{}'번 버스가 {}개 있습니다. 하나를 선택해주세요.",
            first.number,
            candidates.len()
        )?;
        for (i, route) in candidates.iter().enumerate() {
            writeln!(self.output, " [{}] {}", i + 1, route.summary())?;
        }

        loop {
            write!(self.output, "선택할 버스의 번호를 입력하세요: ")?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            let answer = line.trim();
            if answer.is_empty() {
                return Ok(None);
            }

            match answer.parse::<usize>() {
                Ok(n) if (1..=candidates.len()).contains(&n) => return Ok(Some(n - 1)),
                Ok(_) => writeln!(self.output, "잘못된 번호입니다. 다시 입력해주세요.")?,
                Err(_) => writeln!(self.output, "숫자만 입력해주세요.")?,
            }
        }
    }
}

impl<R: BufRead, W: Write> RouteChooser for ConsoleChooser<R, W> {
    fn choose(&mut self, candidates: &[RouteRecord]) -> Option<usize> {
        match self.ask(candidates) {
            Ok(choice) => choice,
            Err(e) => {
                warn!(error = %e, "could not read a choice");
                None
            }
        }
    }
}

/// Ask for a route number on `output` and read it from `input`.
///
/// Returns the trimmed answer, which may be empty.
pub fn prompt_route_number<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    city_name: &str,
) -> std::io::Result<String> {
    write!(output, "조회할 {city_name} 버스 노선 번호를 입력하세요: ")?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RouteId, RouteType};
    use std::io::Cursor;

    fn route(id: &str, route_type: RouteType, origin: &str) -> RouteRecord {
        RouteRecord {
            id: RouteId::new(id).unwrap(),
            number: "5".into(),
            route_type,
            declared_origin: origin.into(),
            declared_terminus: "대전역".into(),
        }
    }

    fn two_routes() -> Vec<RouteRecord> {
        vec![
            route("R1", RouteType::Feeder, "가수원"),
            route("R2", RouteType::Night, "신탄진"),
        ]
    }

    /// Answers from a fixed script and counts how often it was asked.
    struct Scripted {
        answer: Option<usize>,
        asked: usize,
    }

    impl RouteChooser for Scripted {
        fn choose(&mut self, _candidates: &[RouteRecord]) -> Option<usize> {
            self.asked += 1;
            self.answer
        }
    }

    #[test]
    fn single_candidate_is_chosen_without_asking() {
        let mut chooser = Scripted {
            answer: None,
            asked: 0,
        };
        let only = route("R1", RouteType::Trunk, "원내동");

        assert_eq!(
            choose_one(vec![only.clone()], &mut chooser),
            Choice::Chosen(only)
        );
        assert_eq!(chooser.asked, 0);
    }

    #[test]
    fn no_candidates() {
        let mut chooser = Scripted {
            answer: Some(0),
            asked: 0,
        };
        assert_eq!(choose_one(vec![], &mut chooser), Choice::NoCandidates);
        assert_eq!(chooser.asked, 0);
    }

    #[test]
    fn chooser_decides_between_several() {
        let mut chooser = Scripted {
            answer: Some(1),
            asked: 0,
        };
        let Choice::Chosen(chosen) = choose_one(two_routes(), &mut chooser) else {
            panic!("expected a choice");
        };
        assert_eq!(chosen.id.as_str(), "R2");
        assert_eq!(chooser.asked, 1);
    }

    #[test]
    fn out_of_range_index_cancels() {
        let mut chooser = Scripted {
            answer: Some(7),
            asked: 0,
        };
        assert_eq!(choose_one(two_routes(), &mut chooser), Choice::Cancelled);
    }

    #[test]
    fn console_reprompts_until_valid() {
        let input = Cursor::new("abc\n9\n2\n");
        let mut output = Vec::new();

        let choice = ConsoleChooser::new(input, &mut output).choose(&two_routes());
        assert_eq!(choice, Some(1));

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("'5'번 버스가 2개 있습니다."));
        assert!(text.contains(" [1] 지선버스: 가수원 ↔ 대전역"));
        assert!(text.contains(" [2] 심야버스: 신탄진 ↔ 대전역"));
        assert!(text.contains("숫자만 입력해주세요."));
        assert!(text.contains("잘못된 번호입니다."));
        assert_eq!(text.matches("선택할 버스의 번호를 입력하세요").count(), 3);
    }

    #[test]
    fn console_cancels_on_empty_line_or_eof() {
        let mut output = Vec::new();
        let empty_line = ConsoleChooser::new(Cursor::new("\n"), &mut output).choose(&two_routes());
        assert_eq!(empty_line, None);

        let eof = ConsoleChooser::new(Cursor::new(""), &mut output).choose(&two_routes());
        assert_eq!(eof, None);
    }

    #[test]
    fn console_with_no_candidates_cancels_without_prompting() {
        let mut output = Vec::new();
        let choice = ConsoleChooser::new(Cursor::new("1\n"), &mut output).choose(&[]);

        assert_eq!(choice, None);
        assert!(output.is_empty());
    }

    #[test]
    fn prompt_trims_the_answer() {
        let mut output = Vec::new();
        let answer =
            prompt_route_number(&mut Cursor::new("  102 \n"), &mut output, "대전광역시(계룡시)")
                .unwrap();

        assert_eq!(answer, "102");
        assert!(String::from_utf8(output).unwrap().contains("대전광역시(계룡시) 버스 노선 번호"));
    }
}
