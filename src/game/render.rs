//! ASCII debug rendering of a state over its map.

use crate::game::map::Map;
use crate::game::state::{State, GADGET_DELETED};

/// Render one state: snakes as `A`, `B`, ... with `^v<>` body arrows,
/// gadgets as digits, fruit as `Q`, the exit as `*`, teleporter endpoints as
/// `X`, everything else as terrain.
pub fn render(st: &State, map: &Map) -> String {
    let params = &map.params;
    let w = params.width;
    let mut grid: Vec<u8> = (0..params.cells())
        .map(|i| map.terrain(i as i32))
        .collect();

    grid[map.exit as usize] = b'*';
    for &(a, b) in map.teleporters.iter() {
        grid[a as usize] = b'X';
        grid[b as usize] = b'X';
    }
    for (fi, &cell) in map.fruit.iter().enumerate() {
        if st.fruit_active(fi) {
            grid[cell as usize] = b'Q';
        }
    }
    for (gi, shape) in map.gadgets.iter().enumerate() {
        let offset = st.gadgets[gi];
        if offset != GADGET_DELETED {
            for &rel in shape.cells() {
                grid[(offset as i32 + rel as i32) as usize] = b'0' + gi as u8;
            }
        }
    }
    for (si, snake) in st.snakes[..params.snakes].iter().enumerate() {
        for (j, cell) in snake.cells(w).enumerate() {
            grid[cell as usize] = if j == 0 {
                b'A' + si as u8
            } else {
                snake.tail_dir(j - 1).arrow() as u8
            };
        }
    }

    let mut out = String::with_capacity(params.cells() + params.height);
    for row in grid.chunks(w) {
        out.push_str(std::str::from_utf8(row).expect("grid is ASCII"));
        out.push('\n');
    }
    out
}
