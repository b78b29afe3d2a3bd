use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;
use shogi_engine::{utils::perft, AiPlayer, Board, Difficulty, Game, GameStateChecker, MoveValidator, Side};

fn material_by_iter(board: &Board) -> i32 {
    board.iter_pieces().map(|(_, piece)| piece.value()).sum()
}

fn material_by_cells(board: &Board) -> i32 {
    let mut result = 0;
    for pos in shogi_engine::Position::all() {
        if let Some(piece) = board.piece_at(pos) {
            result += piece.value();
        }
    }
    result
}

fn random_game(mut game: Game, max_steps: usize) -> Game {
    for _ in 0..max_steps {
        if game.play_ai(Difficulty::Easy).is_err() {
            break;
        }
    }
    game
}

fn criterion_benchmark(c: &mut Criterion) {
    let board = Board::initial();
    c.bench_function("iter material", |b| b.iter(|| material_by_iter(black_box(&board))));
    c.bench_function("cell material", |b| b.iter(|| material_by_cells(black_box(&board))));
    c.bench_function("legal moves", |b| {
        b.iter(|| MoveValidator.legal_moves(black_box(&board), Side::Sente))
    });
    c.bench_function("check state", |b| {
        let checker = GameStateChecker::default();
        b.iter(|| checker.check(black_box(&board), Side::Gote))
    });
    c.bench_function("perft 2", |b| b.iter(|| perft(black_box(&board), Side::Sente, 2)));
    c.bench_function("random game 100", |b| b.iter(|| random_game(Game::default(), 100)));

    let ai = AiPlayer::default();
    let mut rng = StdRng::seed_from_u64(42);
    c.bench_function("medium move", |b| {
        b.iter(|| ai.best_move_with_rng(black_box(&board), Side::Sente, Difficulty::Medium, &mut rng))
    });
    let mut group = c.benchmark_group("search");
    group.sample_size(10);
    group.bench_function("hard move", |b| {
        b.iter(|| ai.best_move_with_rng(black_box(&board), Side::Sente, Difficulty::Hard, &mut rng))
    });
    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
