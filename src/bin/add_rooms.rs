//! Seeds the six sample rooms. Safe to run repeatedly: room numbers that
//! already exist are left untouched.

use dotenv::dotenv;
use env_logger::Env;

use hostel_admin::config::Config;
use hostel_admin::db;
use hostel_admin::models::room::RoomType;

struct SampleRoom {
    number: &'static str,
    room_type: RoomType,
    capacity: i64,
    price_per_night: f64,
}

const SAMPLE_ROOMS: &[SampleRoom] = &[
    SampleRoom { number: "101", room_type: RoomType::Single, capacity: 1, price_per_night: 45.0 },
    SampleRoom { number: "102", room_type: RoomType::Double, capacity: 2, price_per_night: 65.0 },
    SampleRoom { number: "103", room_type: RoomType::Dorm, capacity: 4, price_per_night: 25.0 },
    SampleRoom { number: "104", room_type: RoomType::Suite, capacity: 3, price_per_night: 95.0 },
    SampleRoom { number: "201", room_type: RoomType::Double, capacity: 2, price_per_night: 65.0 },
    SampleRoom { number: "202", room_type: RoomType::Single, capacity: 1, price_per_night: 45.0 },
];

#[tokio::main]
async fn main() {
    dotenv().ok();
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            log::error!("fatal: {}", err);
            std::process::exit(1);
        }
    };

    let pool = db::connect(&config.database_url)
        .await
        .expect("Failed to create pool");
    db::MIGRATOR
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    for room in SAMPLE_ROOMS {
        // Floor is the leading digit of the room number.
        let floor = room
            .number
            .chars()
            .next()
            .and_then(|c| c.to_digit(10))
            .unwrap_or(1) as i64;

        let result = sqlx::query(
            "INSERT OR IGNORE INTO rooms (room_number, floor, room_type, capacity, price_per_night)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(room.number)
        .bind(floor)
        .bind(room.room_type)
        .bind(room.capacity)
        .bind(room.price_per_night)
        .execute(&pool)
        .await
        .expect("Failed to insert room");

        if result.rows_affected() == 1 {
            log::info!("Created room {} ({})", room.number, room.room_type);
        } else {
            log::info!("Room {} already exists", room.number);
        }
    }

    log::info!("All rooms added");
}
