//! Terminal rendering of a laid-out history.

use std::io::{self, Write};

use termcolor::{Color, ColorSpec, WriteColor};

use super::rows::{pass_through, GraphRow};
use super::MAX_LANES;
use crate::git::{short_hash, Commit};

/// One colour per lane, cycling past [`MAX_LANES`].
const LANE_PALETTE: [Color; MAX_LANES] = [
    Color::Blue,
    Color::Green,
    Color::Yellow,
    Color::Magenta,
    Color::Cyan,
    Color::Red,
    Color::Ansi256(208),
    Color::Ansi256(141),
];

const NODE: &str = "● ";
const RAIL: &str = "│ ";
const EMPTY: &str = "  ";

/// Colour used for a lane.
pub fn lane_color(lane: usize) -> Color {
    LANE_PALETTE[lane % MAX_LANES]
}

/// Writes one line per commit: lane gutter, short hash, ref labels, subject.
///
/// `rows` must come from [`super::build_rows`] over the same `commits`; the
/// gutter is `width` lanes wide.
pub fn render_graph<W: WriteColor>(
    out: &mut W,
    commits: &[Commit],
    rows: &[GraphRow],
    width: usize,
) -> io::Result<()> {
    let rails = pass_through(rows);

    for (commit, row) in commits.iter().zip(rows) {
        for lane in 0..width {
            let glyph = if lane == row.lane {
                NODE
            } else if rails.binary_search(&(row.row, lane)).is_ok() {
                RAIL
            } else {
                EMPTY
            };
            out.set_color(ColorSpec::new().set_fg(Some(lane_color(lane))))?;
            write!(out, "{glyph}")?;
        }

        out.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)))?;
        write!(out, "{}", short_hash(&commit.hash))?;
        out.reset()?;

        if !commit.refs.is_empty() {
            write!(out, " (")?;
            for (i, label) in commit.refs.iter().enumerate() {
                if i > 0 {
                    write!(out, ", ")?;
                }
                let mut spec = ColorSpec::new();
                spec.set_fg(Some(Color::Green))
                    .set_bold(label.starts_with("HEAD"));
                out.set_color(&spec)?;
                write!(out, "{label}")?;
                out.reset()?;
            }
            write!(out, ")")?;
        }

        if !row.dangling_parents.is_empty() {
            out.set_color(ColorSpec::new().set_dimmed(true))?;
            write!(out, " ↓")?;
            out.reset()?;
        }

        writeln!(out, " {}", commit.message)?;
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::graph::{assign_lanes, build_rows};
    use termcolor::NoColor;

    fn render(commits: &[Commit]) -> String {
        let layout = assign_lanes(commits);
        let rows = build_rows(commits, &layout);
        let mut out = NoColor::new(Vec::new());
        render_graph(&mut out, commits, &rows, layout.width()).unwrap();
        String::from_utf8(out.into_inner()).unwrap()
    }

    #[test]
    fn renders_merge_with_rails() {
        let commits = vec![
            Commit::new("aaaaaaaaaa", ["bbbbbbbbbb", "cccccccccc"])
                .with_message("Merge feature")
                .with_refs(["HEAD -> main"]),
            Commit::new("bbbbbbbbbb", ["dddddddddd"]).with_message("Main work"),
            Commit::new("cccccccccc", ["dddddddddd"]).with_message("Feature work"),
            Commit::new("dddddddddd", Vec::<String>::new()).with_message("Initial"),
        ];

        let expected = "\
●   aaaaaaa (HEAD -> main) Merge feature
● │ bbbbbbb Main work
│ ● ccccccc Feature work
●   ddddddd Initial
";
        assert_eq!(render(&commits), expected);
    }

    #[test]
    fn marks_truncated_history() {
        let commits = vec![Commit::new("abcdef123", ["beyond"]).with_message("Tip")];
        assert_eq!(render(&commits), "● abcdef1 ↓ Tip\n");
    }

    #[test]
    fn lane_colors_cycle() {
        assert_eq!(lane_color(0), lane_color(MAX_LANES));
        assert_ne!(lane_color(0), lane_color(1));
    }
}
