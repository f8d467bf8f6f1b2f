use bevy::app::AppExit;

fn main() -> AppExit {
    imposter_launcher::run()
}
