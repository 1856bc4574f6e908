//! Built-in keyword dictionaries.
//!
//! Entries are regex fragments matched case-insensitively and unanchored, so a
//! stem such as `zavjer` also matches `zavjera`, `zavjere` and `zavjerenički`.
//! Inflected forms that do not share a stem are listed explicitly. Unanchored
//! matching also fires inside unrelated longer words; that is a known
//! limitation of the corpus labels and is kept for compatibility.

use framescope_core::{Actor, CatholicSubcategory, Frame, MediaType};

/// Frame dictionaries in declaration order.
pub const FRAME_DICTIONARIES: [(Frame, &[&str]); Frame::COUNT] = [
    (
        Frame::Conspiracy,
        &[
            "zavjer",
            "urot",
            "tajn(i|og|a|e) plan",
            "skrivena agenda",
            "skriveni ciljevi",
            "duboka država",
            "duboke države",
            "deep state",
            "novi svjetski poredak",
            "new world order",
            "iluminat",
            "masonsk",
            "plandemij",
            "chemtrail",
            "veliki reset",
            "great reset",
            "iza kulisa",
            "marionet",
            "namjerno širen",
        ],
    ),
    (
        Frame::ForeignThreat,
        &[
            "strani utjecaj",
            "stranog utjecaja",
            "stran(e|ih) sil",
            "soros",
            "diktat (iz )?bruxellesa",
            "bruxelleski diktat",
            "hibridn(i|og|om) rat",
            "ruska propaganda",
            "ruske propagande",
            "ruski utjecaj",
            "kineski utjecaj",
            "migrantsk(a|e|oj) kriz",
            "ilegaln(i|ih|im) migrant",
            "invazij",
            "gubitak suvereniteta",
            "ugrožavanje suvereniteta",
            "prijetnja suverenitetu",
            "kolonij(a|e) zapada",
        ],
    ),
    (
        Frame::InstitutionalDistrust,
        &[
            "korupcij",
            "korumpiran",
            "nepovjerenj",
            "lopovluk",
            "lopovi na vlasti",
            "zataškav",
            "selektivn(a|e|u) pravd",
            "pravosuđe ne radi",
            "nitko ne odgovara",
            "nitko nije odgovarao",
            "trul(a|e|u) držav",
            "sustav je truo",
            "izdaj(a|e|u|om) naroda",
            "vlast laže",
            "vlada laže",
            "obmanjuj",
        ],
    ),
    (
        Frame::MediaCritique,
        &[
            "fake news",
            "lažn(e|ih|im) vijesti",
            "mainstream medij",
            "glavnostrujašk",
            "režimsk(i|ih|e) medij",
            "medijsk(a|e|oj|u) manipulacij",
            "medijsk(i|og) linč",
            "plaćen(i|ih) novinar",
            "cenzur",
            "dezinformacij",
            "ispiranje mozga",
            "propagandn(i|a|e|og) stroj",
        ],
    ),
    (
        Frame::MoralDecline,
        &[
            "moraln(i|og|a|e) pad",
            "moraln(a|e|oj) kriz",
            "propast obitelji",
            "razaranje obitelji",
            "kultur(a|e|u) smrti",
            "rodn(a|e|oj|u) ideologij",
            "gender ideologij",
            "dekadencij",
            "razvrat",
            "seksualizacij",
            "bezbožn",
            "bezboštv",
            "relativizacija vrijednosti",
        ],
    ),
    (
        Frame::IdentityThreat,
        &[
            "nacionaln(i|og|om) identitet",
            "hrvatsk(i|og|om) identitet",
            "katoličk(i|og|om) identitet",
            "kršćansk(i|e|ih) korijen",
            "kršćansk(e|ih|im) vrijednost",
            "tradicionaln(e|ih|im) vrijednost",
            "progon kršćana",
            "progona kršćana",
            "kristofobij",
            "antikatoli",
            "napad(i)? na crkvu",
            "iskorjenjivanje vjere",
            "brisanje identiteta",
        ],
    ),
    (
        Frame::HealthSkepticism,
        &[
            "covid[- ]potvrd",
            "eksperimentaln(o|a|im|og) cjepiv",
            "nuspojav",
            "prisiln(o|og|a) cijepljenj",
            "obvezn(o|og|a) cijepljenj",
            "big pharma",
            "farmaceutsk(i|ih|e) lobi",
            "ivermektin",
            "maske ne štite",
            "lockdown",
            "medicinski fašizam",
            "zdravstven(a|u|e) diktatur",
        ],
    ),
    (
        Frame::AntiElite,
        &[
            "političk(a|e|oj|u) elit",
            "globalist",
            "establi(s|š)ment",
            "obični ljudi",
            "običnih ljudi",
            "običan narod",
            "mali čovjek",
            "privilegiran(a|e|ih) manjin",
            "oni na vrhu",
            "bahatost vlasti",
            "uhljeb",
            "financijsk(a|e|oj) elit",
        ],
    ),
];

/// Actor dictionaries.
pub const ACTOR_DICTIONARIES: [(Actor, &[&str]); Actor::COUNT] = [
    (
        Actor::Church,
        &[
            "crkv",
            "biskup",
            "kardinal",
            "papa franj",
            "papinsk",
            "sveti otac",
            "svetog oca",
            "svećenik",
            "župnik",
            "redovni(k|c)",
            "vatikan",
            "stepinac",
            r"\bhbk\b",
        ],
    ),
    (
        Actor::Government,
        &[
            "vlad(a|e|i|u|om) rh",
            "plenković",
            "plenkovic",
            "premijer",
            "ministar",
            "ministarstv",
            "sabor",
            "stožer civilne zaštite",
            "nacionalni stožer",
            "božinović",
            "beroš",
        ],
    ),
    (
        Actor::EuropeanUnion,
        &[
            "europsk(a|e|oj|u) unij",
            "europsk(a|e|oj|u) komisij",
            "europsk(i|og|om) parlament",
            r"\beu\b",
            "von der leyen",
            "bruxelles",
        ],
    ),
    (
        Actor::HealthAuthorities,
        &[
            r"\bhzjz\b",
            "zavod za javno zdravstvo",
            "epidemiolog",
            "svjetska zdravstvena organizacija",
            "svjetske zdravstvene organizacije",
            "capak",
            "markotić",
            "infektolog",
        ],
    ),
    (
        Actor::CivilSociety,
        &[
            "udrug(a|e|u|om)",
            "civiln(o|og|om) društv",
            "nevladin",
            "u ime obitelji",
            "građansk(a|e|u) inicijativ",
            "aktivist",
            "prosvjednik",
        ],
    ),
    (
        Actor::Media,
        &[
            "novinar",
            "urednik",
            r"\bhrt\b",
            "televizij",
            "medij",
            "portal",
        ],
    ),
    (
        Actor::Veterans,
        &[
            "branitelj",
            "veteran",
            "domovinsk(i|og|om) rat",
            "hvidr",
            "ratni vojni invalid",
        ],
    ),
];

/// Catholic outlet tiers, checked in this order before any secular group.
pub const CATHOLIC_OUTLETS: [(CatholicSubcategory, &[&str]); 4] = [
    (
        CatholicSubcategory::OfficialChurch,
        &[
            r"hkm\.hr",
            r"hbk\.hr",
            r"ika\.hkm",
            r"nadbiskupija",
            r"biskupija",
            r"vaticannews",
            r"vatican\.va",
            r"glas-?koncila",
            r"ktabkbih",
        ],
    ),
    (
        CatholicSubcategory::CatholicRadio,
        &[
            r"radio-?marija",
            r"hkr\.hr",
            r"katolicki-?radio",
            r"radio-?mir",
            r"rmm\.ba",
            r"radio-?kaj",
        ],
    ),
    (
        CatholicSubcategory::CatholicPortals,
        &[
            r"bitno\.net",
            r"book\.hr",
            r"laudato\.hr",
            r"katolici\.org",
            r"vjeraidjela",
            r"zupa-",
            r"franjevci",
            r"salezijanci",
            r"isusovci",
            r"medjugorje",
        ],
    ),
    (
        CatholicSubcategory::CatholicAligned,
        &[
            r"narod\.hr",
            r"vigilare",
            r"uimeobitelji",
            r"obiteljskimagazin",
            r"kamenjar",
        ],
    ),
];

/// Secular outlet groups in priority order.
pub const SECULAR_OUTLETS: [(MediaType, &[&str]); 5] = [
    (
        MediaType::Conservative,
        &[
            r"direktno\.hr",
            r"dnevno\.hr",
            r"hrvatska-?danas",
            r"maxportal",
            r"hkv\.hr",
            r"priznajem",
            r"projekt-?velebit",
        ],
    ),
    (
        MediaType::Liberal,
        &[
            r"index\.hr",
            r"telegram\.hr",
            r"n1info",
            r"h-alter",
            r"novosti\.hr",
            r"lupiga",
            r"forum\.tm",
            r"faktograf",
            r"net\.hr",
        ],
    ),
    (
        MediaType::Tabloid,
        &[
            r"24sata",
            r"story\.hr",
            r"gloria\.hr",
            r"extra\.hr",
            r"hello\.hr",
            r"showbuzz",
        ],
    ),
    (
        MediaType::Regional,
        &[
            r"slobodnadalmacija",
            r"glas-?slavonije",
            r"novilist",
            r"glas-?istre",
            r"zadarski",
            r"dubrovackidnevnik",
            r"varazdinske",
            r"epodravina",
            r"sbperiskop",
            r"ibl\.hr",
        ],
    ),
    (
        MediaType::Business,
        &[
            r"poslovni\.hr",
            r"lidermedia",
            r"lider\.media",
            r"bloombergadria",
            r"forbes",
            r"mojnovac",
            r"seebiz",
            r"netokracija",
        ],
    ),
];
