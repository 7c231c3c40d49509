use crate::app::{AppContext, Result};
use crate::domain::Story;
use crate::presenter::StoryList;

pub async fn list_stories(ctx: &AppContext) -> Result<()> {
    let params = ctx.params();
    let mut list = StoryList::new();

    println!(
        "Loading {} stories ordered by {}...",
        params.section, params.order_by
    );
    ctx.presenter.load(&params, &mut list).await?;

    if let Some(message) = list.message() {
        println!("{}", message);
        return Ok(());
    }

    for (index, story) in list.stories().iter().enumerate() {
        println!("{}", format_story(index, story));
    }

    Ok(())
}

pub fn print_url(ctx: &AppContext) -> Result<()> {
    println!("{}", ctx.presenter.request_url(&ctx.params())?);
    Ok(())
}

fn format_story(index: usize, story: &Story) -> String {
    format!(
        "{:>2}. [{}] {}\n    {}",
        index + 1,
        story.section(),
        story.display_title(),
        story.url()
    )
}
