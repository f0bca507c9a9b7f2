//! Built-in puzzle maps.
//!
//! Each level is the ASCII literal plus its parameter tuple. Maps are
//! bordered with walls (bottom row spikes), so the engine's single-step
//! index arithmetic can never leave the grid. `optimal_moves` records the
//! known shortest solution where one has been verified; the hardest levels
//! have none recorded because solving them needs tens of gigabytes of
//! scratch disk.

use crate::game::params::Params;

#[derive(Debug, Clone, Copy)]
pub struct Level {
    pub name: &'static str,
    pub params: Params,
    pub map: &'static str,
    pub optimal_moves: Option<usize>,
}

const fn p(
    height: usize,
    width: usize,
    fruit: usize,
    snakes: usize,
    snake_max_len: usize,
    gadgets: usize,
    teleporters: usize,
) -> Params {
    Params {
        height,
        width,
        fruit,
        snakes,
        snake_max_len,
        gadgets,
        teleporters,
    }
}

pub fn all() -> Vec<Level> {
    vec![
        Level {
            name: "level01",
            params: p(11, 10, 2, 1, 4, 0, 0),
            optimal_moves: Some(16),
            map: concat!(
                "..........",
                ".    *   .",
                ".        .",
                ". .      .",
                ". O  .O. .",
                ".        .",
                ".  .>G   .",
                ".  ....  .",
                ".  ....  .",
                ".  ...   .",
                "~~~~~~~~~~",
            ),
        },
        Level {
            name: "level10",
            params: p(14, 14, 2, 1, 6, 0, 0),
            optimal_moves: Some(33),
            map: concat!(
                "..............",
                ".  ...       .",
                ". .... *     .",
                ".    .       .",
                ".  O .   v.. .",
                ".      R<<.  .",
                ".   .... ..  .",
                ".    ... .   .",
                ".      . O   .",
                ".      . ..  .",
                ".      . ..  .",
                ".     .. ..  .",
                ".     ....   .",
                "~~~~~~~~~~~~~~",
            ),
        },
        Level {
            name: "level12",
            params: p(17, 15, 2, 1, 7, 0, 0),
            optimal_moves: Some(52),
            map: concat!(
                "...............",
                ".    .        .",
                ".    .        .",
                ".    ~        .",
                ".   v B       .",
                ".   >>^       .",
                ".    .        .",
                ".         ~   .",
                ".           * .",
                ". ~.~  ~~~.   .",
                ".        ..   .",
                ".             .",
                ". O   ~       .",
                ".    .~O      .",
                ".    ...      .",
                ".    ...      .",
                "~~~~~~~~~~~~~~~",
            ),
        },
        Level {
            name: "level14",
            params: p(11, 13, 0, 2, 3, 0, 0),
            optimal_moves: Some(24),
            map: concat!(
                ".............",
                ".           .",
                ".           .",
                ".         ~ .",
                ".  *   >B   .",
                ".      >R . .",
                ".      ^. . .",
                ".   .   . . .",
                ".   .   . . .",
                ".   .   . . .",
                "~~~~~~~~~~~~~",
            ),
        },
        Level {
            name: "level15",
            params: p(13, 15, 0, 2, 4, 0, 0),
            optimal_moves: Some(34),
            map: concat!(
                "...............",
                ".             .",
                ".             .",
                ".      .      .",
                ".      .      .",
                ".      .    * .",
                ".             .",
                ".   .     .   .",
                ".  >>R        .",
                ". .^ v        .",
                ". .G<<        .",
                ". ....        .",
                "~~~~~~~~~~~~~~~",
            ),
        },
        Level {
            name: "level22",
            params: p(13, 13, 0, 1, 3, 1, 0),
            optimal_moves: Some(45),
            map: concat!(
                ".............",
                ".     *     .",
                ".           .",
                ".           .",
                ".           .",
                ".           .",
                ".  >>R      .",
                ".   ..   00 .",
                ".   .. . 00 .",
                ".   ..   .. .",
                ".   ....... .",
                ".   ....... .",
                "~~~~~~~~~~~~~",
            ),
        },
        Level {
            name: "level24",
            params: p(14, 10, 1, 2, 4, 1, 0),
            optimal_moves: Some(26),
            map: concat!(
                "..........",
                ".   O    .",
                ".   .    .",
                ".        .",
                ".        .",
                ".        .",
                ".        .",
                ". 000 v  .",
                ". 000B<* .",
                ".  0 R<  .",
                ".  ...^  .",
                ".  ...   .",
                ".   .    .",
                "~~~~~~~~~~",
            ),
        },
        Level {
            name: "level35",
            params: p(21, 11, 2, 1, 6, 0, 1),
            optimal_moves: Some(29),
            map: concat!(
                "...........",
                ". ....... .",
                ".  .....  .",
                ".  .....  .",
                ".         .",
                ".      .  .",
                ".      #  .",
                ".       O .",
                ".    T .  .",
                ".      .  .",
                ".         .",
                ". * >>B   .",
                ".   ^.    .",
                ".    .    .",
                ".     T   .",
                ".    ##   .",
                ".    O    .",
                ".    ..   .",
                ".    ..   .",
                ".    ..   .",
                "~~~~~~~~~~~",
            ),
        },
        Level {
            name: "level36",
            params: p(13, 20, 0, 2, 5, 0, 1),
            optimal_moves: Some(29),
            map: concat!(
                "....................",
                ".                  .",
                ".  ....        ... .",
                ".  ....        ... .",
                ".   ..             .",
                ". .             *  .",
                ". .                .",
                ". . >>R   #    ... .",
                ". T>^G<<     ###   .",
                ". ......##T  #     .",
                ".   ..   ###.#     .",
                ".           .      .",
                "~~~~~~~~~~~~~~~~~~~~",
            ),
        },
        Level {
            name: "level37",
            params: p(11, 14, 0, 2, 3, 0, 1),
            optimal_moves: Some(16),
            map: concat!(
                "..............",
                ".       .    .",
                ".       .    .",
                ". .....      .",
                ". .   .      .",
                ".   T   .    .",
                ".   .   .    .",
                ".   .G<<T  * .",
                ".   .>>R.    .",
                ".   .....    .",
                "~~~~~~~~~~~~~~",
            ),
        },
        Level {
            name: "level40",
            params: p(16, 22, 0, 2, 5, 2, 0),
            optimal_moves: Some(51),
            map: concat!(
                "......................",
                ".                    .",
                ".           *        .",
                ".                    .",
                ".                    .",
                ".    .               .",
                ".     00             .",
                ".    11              .",
                ".    .               .",
                ".    >v              .",
                ".    .>>B            .",
                ".   G<<<<            .",
                ".    .               .",
                ".    .               .",
                ".    .               .",
                "~~~~~~~~~~~~~~~~~~~~~~",
            ),
        },
        Level {
            name: "level41",
            params: p(11, 20, 2, 2, 5, 0, 0),
            optimal_moves: Some(34),
            map: concat!(
                "....................",
                ".                  .",
                ".     *        .   .",
                ".              .   .",
                ".                  .",
                ".  >B    G<   .    .",
                ".  ^O    O^   ..   .",
                ".     .       ..   .",
                ".     .       .. . .",
                ".     .       .. . .",
                "~~~~~~~~~~~~~~~~~~~~",
            ),
        },
        Level {
            name: "level44",
            params: p(12, 14, 2, 2, 4, 0, 1),
            optimal_moves: Some(36),
            map: concat!(
                "..............",
                ".            .",
                ".    T       .",
                ".      O   * .",
                ".  #O        .",
                ".    #       .",
                ".   >R T     .",
                ".   G<       .",
                ".  #....  #. .",
                ".   .. .   . .",
                ".    . .   . .",
                "~~~~~~~~~~~~~~",
            ),
        },
        Level {
            name: "star2",
            params: p(14, 19, 26, 1, 29, 0, 0),
            optimal_moves: Some(60),
            map: concat!(
                "...................",
                ".     ...         .",
                ".   .......       .",
                ".   . O O ..      .",
                ".  ..O.O.O.. ...  .",
                ".  .OOOOOOO...... .",
                ". .. .O.O. R<< *. .",
                ". ..OOOOOOO.....  .",
                ". ...O.O.O....    .",
                ".   . O O .       .",
                ".    ......       .",
                ".    ......       .",
                ".    ...          .",
                "~~~~~~~~~~~~~~~~~~~",
            ),
        },
        Level {
            name: "star6",
            params: p(18, 14, 0, 3, 3, 3, 0),
            optimal_moves: None,
            map: concat!(
                "..............",
                ".            .",
                ".      *     .",
                ".            .",
                ".      .     .",
                ".  00        .",
                ".  .     .   .",
                ".  ..    .   .",
                ".        ..  .",
                ".  11        .",
                ".  ..        .",
                ".  .. 222..  .",
                ".  ..    ..  .",
                ".  R<<222    .",
                ".  >>G..B<<  .",
                ".  ........  .",
                ".  .......   .",
                "~~~~~~~~~~~~~~",
            ),
        },
    ]
}

pub fn by_name(name: &str) -> Option<Level> {
    all().into_iter().find(|l| l.name == name)
}

pub fn available_names() -> Vec<&'static str> {
    all().iter().map(|l| l.name).collect()
}
