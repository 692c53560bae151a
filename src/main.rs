use nyanlook::error::AppResult;

fn main() -> AppResult<()> {
    nyanlook::entry::run()
}
