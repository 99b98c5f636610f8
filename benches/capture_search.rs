use criterion::{black_box, criterion_group, criterion_main, Criterion};
use chkobba_engine::cards::{standard_deck, StandardCards};
use chkobba_engine::core::{GameConfig, GameRng, Seat};
use chkobba_engine::opponent::{Difficulty, Opponent};
use chkobba_engine::rules::{find_valid_captures, Chkobba};

fn bench_capture_search(c: &mut Criterion) {
    let deck = standard_deck();
    // A King against eight low cards: many overlapping subsets.
    let king = deck[39];
    let table: Vec<_> = [0, 1, 2, 3, 10, 11, 12, 13].iter().map(|&i| deck[i]).collect();

    c.bench_function("capture_search_8_cards", |b| {
        b.iter(|| find_valid_captures(black_box(&king), black_box(&table)))
    });
}

fn bench_opponent_choice(c: &mut Criterion) {
    let mut game = Chkobba::standard(GameConfig::default().with_first_dealer(Seat::Human)).unwrap();
    game.start_new_game(&mut GameRng::new(12345)).unwrap();
    let cards = StandardCards::default();

    for difficulty in [Difficulty::Medium, Difficulty::Expert] {
        let npc = Opponent::new(difficulty);
        let mut rng = GameRng::new(1);
        c.bench_function(&format!("choose_move_{difficulty}"), |b| {
            b.iter(|| npc.choose_move(black_box(game.state()), Seat::Npc, &cards, &mut rng))
        });
    }
}

fn bench_full_round(c: &mut Criterion) {
    let npc = Opponent::new(Difficulty::Hard);

    c.bench_function("full_round_npc_vs_npc", |b| {
        b.iter(|| {
            let mut rng = GameRng::new(99);
            let mut game = Chkobba::standard(GameConfig::default()).unwrap();
            game.start_new_game(&mut rng).unwrap();
            while let Some(mv) = game.legal_moves(game.state().current_player).into_iter().next() {
                match game.state().current_player {
                    Seat::Human => game.play(Seat::Human, &mv).unwrap(),
                    Seat::Npc => game.execute_npc_turn(&npc, &mut rng).unwrap(),
                };
            }
            game
        })
    });
}

criterion_group!(benches, bench_capture_search, bench_opponent_choice, bench_full_round);
criterion_main!(benches);
