use yew::prelude::*;
use shared::{CountSource, ItemTally, Tally};
use crate::{api, styles::*};

#[derive(Properties, PartialEq)]
pub struct ResultsProps {
    pub tally: Tally,
    pub on_refresh: Callback<()>,
    #[prop_or_default]
    pub refreshing: bool,
}

fn render_item(item: &ItemTally) -> Html {
    let width = format!("width: {:.1}%", item.percentage.clamp(0.0, 100.0));
    html! {
        <div class="space-y-1">
            <div class={FLEX_BETWEEN}>
                <span class="font-medium text-gray-100 break-words">{&item.display_name}</span>
                <span class="text-gray-300">
                    {format!("{} votes ({:.1}%)", item.votes, item.percentage)}
                </span>
            </div>
            <div class={PROGRESS_TRACK}>
                <div class={PROGRESS_BAR} style={width} />
            </div>
        </div>
    }
}

fn source_label(source: CountSource) -> &'static str {
    match source {
        CountSource::Store => "Live from the vote store",
        CountSource::Session => "Your session's copy, refresh for the latest",
        CountSource::Fallback => "Counts unavailable, showing zero",
    }
}

#[function_component(Results)]
pub fn results(props: &ResultsProps) -> Html {
    let tally = &props.tally;
    let on_refresh = {
        let on_refresh = props.on_refresh.clone();
        Callback::from(move |_: MouseEvent| on_refresh.emit(()))
    };

    html! {
        <div class={CARD}>
            <div class={combine_classes(FLEX_BETWEEN, "mb-4")}>
                <h2 class={combine_classes(HEADING_MD, "mb-0")}>{"Current results"}</h2>
                <button class={button_primary(false)} onclick={on_refresh} disabled={props.refreshing}>
                    {if props.refreshing { "Refreshing..." } else { "Refresh" }}
                </button>
            </div>

            {if let Some(notice) = &tally.notice {
                html! { <div class={alert_style("warning")}>{notice}</div> }
            } else { html! {} }}

            <div class="space-y-4">
                {for tally.items.iter().map(render_item)}
            </div>

            <div class={combine_classes(FLEX_BETWEEN, "mt-6")}>
                <p class={TEXT_MUTED}>{format!("Total votes: {}", tally.total_votes)}</p>
                <p class={TEXT_MUTED}>{source_label(tally.source)}</p>
            </div>
        </div>
    }
}

/// Standalone results view; always reads past any session copy.
#[function_component(ResultsPage)]
pub fn results_page() -> Html {
    let tally = use_state(|| None::<Tally>);
    let error = use_state(|| None::<String>);
    let refreshing = use_state(|| false);

    let load = {
        let tally = tally.clone();
        let error = error.clone();
        let refreshing = refreshing.clone();
        Callback::from(move |_: ()| {
            let tally = tally.clone();
            let error = error.clone();
            let refreshing = refreshing.clone();
            refreshing.set(true);
            wasm_bindgen_futures::spawn_local(async move {
                match api::fetch_results(true).await {
                    Ok(result) => {
                        tally.set(Some(result));
                        error.set(None);
                    }
                    Err(e) => error.set(Some(e)),
                }
                refreshing.set(false);
            });
        })
    };

    {
        let load = load.clone();
        use_effect_with_deps(move |_| {
            load.emit(());
            || ()
        }, ());
    }

    html! {
        <div class={CONTAINER_SM}>
            {if let Some(err) = &*error {
                html! { <div class={alert_style("error")}>{err}</div> }
            } else { html! {} }}

            {match &*tally {
                Some(tally) => html! {
                    <Results tally={tally.clone()} on_refresh={load} refreshing={*refreshing} />
                },
                None if error.is_none() => html! {
                    <div class="flex justify-center p-8">
                        <div class={combine_classes("animate-pulse", TEXT_MUTED)}>{"Loading results..."}</div>
                    </div>
                },
                None => html! {},
            }}
        </div>
    }
}
