use colored::Colorize;
use itertools::Itertools;
use types::{GridCoord, Walkability, WalkabilityMatrix};

/// What to draw over the terrain
#[derive(Debug, Default)]
pub(crate) struct Overlay<'a> {
    pub start: Option<GridCoord>,
    pub enemies: &'a [GridCoord],
    pub path: &'a [GridCoord],
    pub visited: &'a [GridCoord],
}

fn terrain(cell: Walkability) -> String {
    match cell {
        Walkability::Blocked => "#".dimmed().to_string(),
        Walkability::Free => ".".to_string(),
        Walkability::Goal => "*".cyan().bold().to_string(),
        Walkability::Ladder => "H".to_string(),
        Walkability::Slow => "~".blue().to_string(),
    }
}

pub(crate) fn draw(walkability: &WalkabilityMatrix, overlay: &Overlay) -> String {
    (0..walkability.rows() as i32)
        .map(|row| {
            (0..walkability.cols() as i32)
                .map(|col| {
                    let c = GridCoord::new(row, col);

                    if overlay.enemies.contains(&c) {
                        "E".red().bold().to_string()
                    } else if overlay.start == Some(c) {
                        "S".green().bold().to_string()
                    } else if overlay.path.contains(&c) {
                        "o".green().to_string()
                    } else if overlay.visited.contains(&c) {
                        "x".yellow().to_string()
                    } else {
                        terrain(walkability.get(c))
                    }
                })
                .join(" ")
        })
        .join("\n")
}

pub(crate) fn format_path(path: &[GridCoord]) -> String {
    path.iter().map(|c| c.to_string()).join(" -> ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draw_marks_the_path() {
        colored::control::set_override(false);

        let w = WalkabilityMatrix::compute(
            &types::Maze::from_rows(vec![
                vec![1, 1, 1, 1],
                vec![1, 0, 2, 1],
                vec![1, 1, 1, 1],
            ])
            .unwrap(),
        );
        let path = [GridCoord::new(1, 1), GridCoord::new(1, 2)];
        let overlay = Overlay {
            start: Some(GridCoord::new(1, 1)),
            path: &path,
            ..Default::default()
        };

        assert_eq!(draw(&w, &overlay), "# # # #\n# S o #\n# # # #");
        assert_eq!(format_path(&path), "(1, 1) -> (1, 2)");
    }
}
