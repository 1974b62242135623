use crate::visualizer::bst::Bst;
use crate::visualizer::canvas::{Canvas, TextStyle, palette};

const NODE_RADIUS: f64 = 16.0;
const LIST_NODE_RADIUS: f64 = 18.0;
const CELL_HEIGHT: f64 = 36.0;
const BUCKETS: usize = 6;
const BUCKET_HEIGHT: f64 = 28.0;
const BUCKET_GAP: f64 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Mark {
    Idle,
    Visited,
    Current,
    Found,
}

impl Mark {
    fn classify(visited: bool, current: bool, is_target: bool) -> Self {
        if is_target && visited {
            Self::Found
        } else if current {
            Self::Current
        } else if visited {
            Self::Visited
        } else {
            Self::Idle
        }
    }

    fn fill(&self) -> &'static str {
        match self {
            Self::Found => palette::FOUND,
            Self::Current => palette::CURRENT,
            Self::Visited => palette::VISITED,
            Self::Idle => palette::IDLE,
        }
    }

    fn label_color(&self) -> &'static str {
        match self {
            Self::Found | Self::Current => palette::BACKGROUND,
            _ => palette::TEXT,
        }
    }
}

fn footer(canvas: &mut impl Canvas, text: &str, color: &str) {
    let y = canvas.height() - 8.0;
    canvas.text(8.0, y, text, TextStyle::label(color));
}

/// Marks for sequential scans: position `i` is visited once `i <= step`.
pub(crate) fn scan_marks(values: &[i64], target: i64, step: usize) -> Vec<Mark> {
    values
        .iter()
        .enumerate()
        .map(|(i, &v)| Mark::classify(i <= step, i == step, v == target))
        .collect()
}

pub fn draw_bst(canvas: &mut impl Canvas, dataset: &[i64], target: i64, step: usize) {
    let mut tree = Bst::build(dataset);
    if tree.is_empty() {
        return;
    }
    tree.layout(canvas.width());

    let path = tree.search_path(target);
    let visited = &path[..step.saturating_add(1).min(path.len())];
    let current = path[step.min(path.len() - 1)];

    for (parent, child) in tree.edges() {
        canvas.line((parent.x, parent.y), (child.x, child.y), palette::EDGE, 1.5);
    }

    for node in tree.nodes() {
        let is_visited = visited.contains(&node.value);
        let mark = Mark::classify(is_visited, node.value == current, node.value == target);
        let stroke = match mark {
            Mark::Visited => palette::VISITED_STROKE,
            Mark::Idle => palette::EDGE,
            _ => mark.fill(),
        };

        canvas.circle(node.x, node.y, NODE_RADIUS, mark.fill(), stroke);
        canvas.text(
            node.x,
            node.y,
            &node.value.to_string(),
            TextStyle::centered(mark.label_color(), 11.0, true),
        );
    }

    footer(
        canvas,
        &format!(
            "BST Search: target={}  steps={}/{}",
            target,
            step.saturating_add(1).min(path.len()),
            path.len()
        ),
        palette::FOUND,
    );
}

/// The array is scanned in ascending order.
pub fn draw_array(canvas: &mut impl Canvas, dataset: &[i64], target: i64, step: usize) {
    if dataset.is_empty() {
        return;
    }

    let mut sorted = dataset.to_vec();
    sorted.sort_unstable();

    let (w, h) = (canvas.width(), canvas.height());
    let cell_w = 40f64.min((w - 20.0) / sorted.len() as f64);
    let start_x = (w - cell_w * sorted.len() as f64) / 2.0;
    let start_y = h / 2.0 - CELL_HEIGHT / 2.0;

    for (i, (value, mark)) in sorted
        .iter()
        .zip(scan_marks(&sorted, target, step))
        .enumerate()
    {
        let x = start_x + i as f64 * cell_w;
        let stroke = match mark {
            Mark::Found | Mark::Current => mark.fill(),
            _ => palette::EDGE,
        };

        canvas.fill_rect(x, start_y, cell_w - 2.0, CELL_HEIGHT, mark.fill());
        canvas.stroke_rect(x, start_y, cell_w - 2.0, CELL_HEIGHT, stroke, 1.0);
        canvas.text(
            x + (cell_w - 2.0) / 2.0,
            start_y + CELL_HEIGHT / 2.0,
            &value.to_string(),
            TextStyle::centered(mark.label_color(), 11.0, true),
        );
    }

    if step < sorted.len() {
        let arrow_x = start_x + step as f64 * cell_w + (cell_w - 2.0) / 2.0;
        canvas.text(
            arrow_x,
            start_y - 12.0,
            "▼",
            TextStyle::centered(palette::CURRENT, 14.0, false),
        );
    }

    footer(
        canvas,
        &format!(
            "Linear Search: scanned {}/{} elements",
            step.saturating_add(1).min(sorted.len()),
            sorted.len()
        ),
        palette::CURRENT,
    );
}

/// Six fixed buckets, bucket `i` holding `dataset[i % len]`. Illustrative only.
pub fn draw_hashmap(canvas: &mut impl Canvas, dataset: &[i64], target: i64, step: usize) {
    if dataset.is_empty() {
        return;
    }

    let bucket_w = canvas.width() - 40.0;
    let start_x = 20.0;
    let start_y = 20.0;
    let looked_up = step > 0;

    for i in 0..BUCKETS {
        let y = start_y + i as f64 * (BUCKET_HEIGHT + BUCKET_GAP);
        let value = dataset[i % dataset.len()];
        let found = looked_up && value == target;
        let active = looked_up && i == 0;

        let fill = if found {
            palette::FOUND
        } else if active {
            palette::CURRENT
        } else {
            palette::IDLE
        };

        canvas.fill_rect(start_x, y, bucket_w, BUCKET_HEIGHT, fill);
        canvas.stroke_rect(
            start_x,
            y,
            bucket_w,
            BUCKET_HEIGHT,
            if found { palette::FOUND } else { palette::EDGE },
            1.0,
        );
        canvas.text(
            start_x + 6.0,
            y + BUCKET_HEIGHT / 2.0 + 4.0,
            &format!("[{}]", i),
            TextStyle {
                size: 9.0,
                ..TextStyle::label(palette::MUTED)
            },
        );
        canvas.text(
            start_x + bucket_w / 2.0 + 10.0,
            y + BUCKET_HEIGHT / 2.0,
            &value.to_string(),
            TextStyle::centered(
                if found { palette::BACKGROUND } else { palette::TEXT },
                11.0,
                false,
            ),
        );
    }

    let label = if looked_up {
        format!("HashMap: O(1) direct lookup → found {}", target)
    } else {
        format!("HashMap: hash({}) → bucket index", target)
    };
    footer(canvas, &label, palette::FOUND);
}

pub fn draw_linked_list(canvas: &mut impl Canvas, dataset: &[i64], target: i64, step: usize) {
    if dataset.is_empty() {
        return;
    }

    let r = LIST_NODE_RADIUS;
    let spacing = 60f64.min((canvas.width() - 40.0) / dataset.len() as f64);
    let start_x = 30.0;
    let y = canvas.height() / 2.0;

    for (i, (value, mark)) in dataset
        .iter()
        .zip(scan_marks(dataset, target, step))
        .enumerate()
    {
        let x = start_x + i as f64 * spacing;

        if i + 1 < dataset.len() {
            let tip = x + spacing - r;
            canvas.line((x + r, y), (tip, y), palette::EDGE, 1.5);
            canvas.polygon(&[(tip, y - 4.0), (tip + 6.0, y), (tip, y + 4.0)], palette::EDGE);
        }

        let stroke = match mark {
            Mark::Found | Mark::Current => mark.fill(),
            _ => palette::EDGE,
        };
        canvas.circle(x, y, r, mark.fill(), stroke);
        canvas.text(
            x,
            y,
            &value.to_string(),
            TextStyle::centered(mark.label_color(), 10.0, true),
        );
    }

    footer(
        canvas,
        &format!(
            "Linked List: traversed {}/{} nodes",
            step.saturating_add(1).min(dataset.len()),
            dataset.len()
        ),
        palette::CURRENT,
    );
}
