use std::{cell::RefCell, rc::Rc};
use yew::prelude::*;
use gloo_timers::callback::Timeout;
use futures::try_join;
use shared::{Item, PollInfo, Tally};
use crate::{api, config::CONFIG, notice::{Notice, NoticeSeq}, results::Results, styles::*};

fn show_notice(
    notice: &UseStateHandle<Option<Notice>>,
    seq: &Rc<RefCell<NoticeSeq>>,
    value: Notice,
) -> u32 {
    let ticket = seq.borrow_mut().next();
    notice.set(Some(value));
    ticket
}

#[derive(Properties, PartialEq)]
struct CandidateProps {
    item: Item,
    votes: Option<i64>,
    disabled: bool,
    on_vote: Callback<String>,
}

#[function_component(Candidate)]
fn candidate(props: &CandidateProps) -> Html {
    let onclick = {
        let id = props.item.id.clone();
        let on_vote = props.on_vote.clone();
        Callback::from(move |_: MouseEvent| on_vote.emit(id.clone()))
    };

    html! {
        <div class={CARD_HOVER_SCALE}>
            <h2 class={combine_classes(HEADING_SM, "text-center break-words")}>{&props.item.display_name}</h2>
            <img
                class="w-full rounded-md mb-2"
                src={props.item.image.clone()}
                alt={props.item.display_name.clone()}
            />
            {if let Some(votes) = props.votes {
                html! { <p class={TEXT_MUTED}>{format!("{} votes", votes)}</p> }
            } else { html! {} }}
            <button class={button_vote()} {onclick} disabled={props.disabled}>
                {"Vote"}
            </button>
        </div>
    }
}

#[function_component(Poll)]
pub fn poll() -> Html {
    let info = use_state(|| None::<PollInfo>);
    let tally = use_state(|| None::<Tally>);
    let notice = use_state(|| None::<Notice>);
    let voting = use_state(|| None::<String>);
    let refreshing = use_state(|| false);
    let notice_seq = use_mut_ref(NoticeSeq::default);

    {
        let info = info.clone();
        let tally = tally.clone();
        let notice = notice.clone();
        let notice_seq = notice_seq.clone();
        use_effect_with_deps(move |_| {
            wasm_bindgen_futures::spawn_local(async move {
                match try_join!(api::fetch_poll(), api::fetch_results(false)) {
                    Ok((poll_info, results)) => {
                        info.set(Some(poll_info));
                        tally.set(Some(results));
                    }
                    Err(e) => {
                        show_notice(&notice, &notice_seq, Notice::Error(e));
                    }
                }
            });
            || ()
        }, ());
    }

    let on_vote = {
        let tally = tally.clone();
        let notice = notice.clone();
        let voting = voting.clone();
        let info = info.clone();
        let notice_seq = notice_seq.clone();
        Callback::from(move |id: String| {
            if voting.is_some() {
                return;
            }
            voting.set(Some(id.clone()));

            let tally = tally.clone();
            let notice = notice.clone();
            let voting = voting.clone();
            let notice_seq = notice_seq.clone();
            let display_name = (*info).as_ref()
                .and_then(|info| info.items.iter().find(|item| item.id == id))
                .map(|item| item.display_name.clone())
                .unwrap_or_else(|| id.clone());

            wasm_bindgen_futures::spawn_local(async move {
                match api::cast_vote(&id).await {
                    Ok(response) => {
                        tally.set(Some(response.tally));
                        let message = format!("Vote recorded for {}", display_name);
                        let ticket = show_notice(&notice, &notice_seq, Notice::Success(message));

                        let notice = notice.clone();
                        let notice_seq = notice_seq.clone();
                        Timeout::new(CONFIG.notice_timeout_ms, move || {
                            if notice_seq.borrow().is_current(ticket) {
                                notice.set(None);
                            }
                        }).forget();
                    }
                    Err(e) => {
                        show_notice(&notice, &notice_seq, Notice::Error(e));
                    }
                }
                voting.set(None);
            });
        })
    };

    let on_refresh = {
        let tally = tally.clone();
        let notice = notice.clone();
        let refreshing = refreshing.clone();
        let notice_seq = notice_seq.clone();
        Callback::from(move |_: ()| {
            let tally = tally.clone();
            let notice = notice.clone();
            let refreshing = refreshing.clone();
            let notice_seq = notice_seq.clone();
            refreshing.set(true);
            wasm_bindgen_futures::spawn_local(async move {
                match api::fetch_results(true).await {
                    Ok(results) => tally.set(Some(results)),
                    Err(e) => {
                        show_notice(&notice, &notice_seq, Notice::Error(e));
                    }
                }
                refreshing.set(false);
            });
        })
    };

    let notice_html = match &*notice {
        Some(Notice::Success(message)) => html! { <div class={alert_style("success")}>{message}</div> },
        Some(Notice::Error(message)) => html! { <div class={alert_style("error")}>{message}</div> },
        None => html! {},
    };

    let Some(poll_info) = &*info else {
        return html! {
            <div class={CONTAINER}>
                {notice_html}
                <div class="flex justify-center p-8">
                    <div class={combine_classes("animate-pulse", TEXT_MUTED)}>{"Loading poll..."}</div>
                </div>
            </div>
        };
    };

    html! {
        <div class={CONTAINER}>
            <h1 class={HEADING_LG}>{&poll_info.title}</h1>
            {notice_html}

            <div class={combine_classes(GRID_ITEMS, "mb-10")}>
                {for poll_info.items.iter().map(|item| html! {
                    <Candidate
                        key={item.id.clone()}
                        item={item.clone()}
                        votes={(*tally).as_ref().and_then(|t| t.votes_for(&item.id))}
                        disabled={voting.is_some()}
                        on_vote={on_vote.clone()}
                    />
                })}
            </div>

            <div class={SPACE_Y_LG}>
                {if let Some(results) = &*tally {
                    html! { <Results tally={results.clone()} on_refresh={on_refresh} refreshing={*refreshing} /> }
                } else { html! {} }}
            </div>
        </div>
    }
}
