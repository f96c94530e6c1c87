// Custom emoji pools, one per countdown mood.

pub const EARLY: &[&str] = &[
    "<:TrollDespair:1081962916615553034>",
    "<a:Loading:1229852033981612102>",
    "<a:pepeSmoke:1081963039881961572>",
    "<a:pepeMeltdown:1081967381460557824>",
    "<a:peepoLurk:1229866148489859255>",
    "<:AWNAWWWW:1411850454626861096>",
    "<:AlienUnpleased:1411850384439251035>",
    "<:Buggin:1411850686995632199>",
    "<:FeelsOldMan:1411861297255026830>",
    "<a:NAHHH:1229857243999109243>",
    "<:NoBitches:1411861731294318654>",
    "<:Waiting:1411861661706354829>",
    "<:WeirdDude:1411877735671791709>",
    "<:Weirdge:1411862572503662703>",
    "<:ReallyMad:1411877862474121266>",
    "<a:SadCat:1229853138958418031>",
    "<a:catBruh:1229852991792615537>",
    "<:catDespair:1229598854140264488>",
    "<a:catWait:1229852915720654878>",
    "<:pepeScream:1411862505394802791>",
    "<a:Awkward:1229853029193482361>",
    "<a:Awkward~1:1411849577778380842>",
    "<:Despairge:1411878584087478394>",
    "<:Crying:1411878641486401646>",
    "<:agaDespair:1411878984194592859>",
    "<a:Plead:1411864761368580218>",
    "<a:WeirdChamping:1411864489477013627>",
    "<a:TouchGrass:1411864242151231509>",
    "<a:omgBruh:1411863929117741218>",
    "<a:Copege:1411879378832593007>",
    "<a:Enough:1411879498047164627>",
    "<a:IMDEAD:1411879744412192860>",
    "<a:JustAnotherDay:1411879858958499850>",
    "<a:deadass:1411879383425355888>",
    "<a:TryHarding:1411880509499375736>",
    "<a:where:1411880522963091487>",
];

pub const MID: &[&str] = &[
    "<:EZ:1081947114663321620>",
    "<:HYPERS:1081947121009295401>",
    "<a:LETSGOOO:1081971175133024377>",
    "<a:NODDERS:1081963012405071953>",
    "<:PauseChamp:1081947249493418028>",
    "<:OkayChamp:1081948107853529108>",
    "<:PagMan:1081948129693290546>",
    "<:PogU:1081948140392939592>",
    "<a:modCheck:1081971177246965871>",
    "<:NAILS:1229843671176839262>",
    "<a:POGGIES:1229852070002294785>",
    "<:Sodge:1263626742317453386>",
    "<:pepeW:1081947385560829973>",
    "<a:peepoClap:1081963018813980804>",
    "<a:nyanPls:1229866114557808641>",
    "<:1G:1411862007212408932>",
    "<a:AlienPls3:1229866466355187744>",
    "<:Bruhge:1411850668939149515>",
    "<:FlushedBite:1411861492747468912>",
    "<a:MONKE:1229857286751518822>",
    "<a:Nessie:1229861597556510841>",
    "<a:WOO:1229857245756657805>",
    "<a:agaCheck:1411849176798462042>",
    "<a:crabPls:1229866458448658552>",
    "<:pepeY:1411861364728795187>",
    "<a:Sisi:1229852717061636106>",
    "<:aga:1411849048981245994>",
    "<a:meow:1229853140786876517>",
    "<:peepoPog:1411878357645266955>",
    "<:sajj:1411862526349807687>",
    "<a:AlienPls:1411849327558529155>",
    "<a:AnkhaPls:1411849504541642964>",
    "<:anga:1411878986627420340>",
    "<a:awaree:1411849553254158517>",
    "<a:borpaCheck:1411849941780926495>",
    "<:dudee:1411878512100642866>",
    "<a:catPls:1411862743497314384>",
    "<a:juh:1229862725841326100>",
    "<a:peepoFine:1411864159943000135>",
    "<a:goosePls:1411879516007301201>",
    "<a:happi:1411879733309870081>",
    "<a:AwareMan:1411879237522165903>",
    "<a:Uware:1411880512255033455>",
];

pub const FINAL_MONTH: &[&str] = &[
    "<a:HYPERNODDERS:1229852036288217118>",
    "<a:OkayuDance:1229866154244182026>",
    "<a:PagBounce:1229866080613437562>",
    "<:PagChomp:1229843704387338281>",
    "<a:sumSmash:1081971182976381118>",
    "<a:ppHop:1081971100193403000>",
    "<a:zyzzBass:1081980963627745460>",
    "<a:waga:1411843141224366232>",
    "<a:docSpin:1229866150347804774>",
    "<a:zyzzPls:1229857288320192542>",
    "<a:zyzzRave:1229861574152294550>",
    "<a:CatSpin:1229852879733391461>",
    "<a:Jigglin:1229852953356013568>",
    "<a:catBop:1411848568100098048>",
    "<a:CatTime:1229853027897442354>",
    "<a:catJam:1229853092766547998>",
    "<a:happie:1229852997002203317>",
    "<a:veryCat:1229852881465905212>",
    "<a:AnnyLebronJam:1411849529124196533>",
    "<a:BLUBBERS:1411849753708204203>",
    "<a:borpafast:1411849800168505507>",
    "<a:catRAVE:1411862766553399336>",
    "<a:Cheergi:1411864001402503198>",
    "<a:lebronJAM:1411862813357379776>",
    "<a:Dance:1411864399492415588>",
    "<a:Headbang:1411864607148216330>",
    "<a:EDM:1411864471949021184>",
    "<a:INSANECAT:1411864653587546226>",
    "<a:MUGA:1411864885142229143>",
    "<a:OOOOBANG:1411864122676744262>",
    "<a:SEXO:1411864455129595944>",
    "<a:ROACH:1411864726958248026>",
    "<a:cokebert:1411863951356067861>",
    "<a:forsenGriddy:1411864083841548350>",
    "<a:goosePls4x:1411878995716345867>",
    "<a:mwah:1411864629738733638>",
    "<a:vibePls:1411864435210977393>",
    "<a:zazabert:1411863893420150866>",
    "<a:BANGER:1411864800165888123>",
    "<a:AYOOO:1411877554771722342>",
    "<a:DEMONCAT:1411879385509789736>",
    "<a:ForsenSingingAtYou:1411879503982235679>",
    "<a:DemonTime:1411879388663779419>",
    "<a:Glerm:1411879509229174824>",
    "<a:HYPERYump:1411879742671687790>",
    "<a:Kissahomie:1411879860707659776>",
    "<a:danse:1411879380380024953>",
    "<a:clappi:1411879249165418607>",
    "<a:duckass:1411879397161570366>",
    "<a:dvaWalk4x:1411879494192464055>",
    "<a:glorpNotL:1411879514233114694>",
    "<a:lerolero:1411879867812675594>",
    "<a:PartyKirby:1411880282226819243>",
    "<a:RainbowPls:1411880375537631372>",
    "<a:Sussy4x:1411880500930285568>",
    "<a:VeiO:1411880518655676566>",
    "<a:veiNODDERS:1411880514104725644>",
    "<a:poggSpin:1411880370198024292>",
    "<a:WOW:1411880525836320779>",
    "<a:luh:1411880270533103636>",
    "<a:marinFlush:1411880272944824351>",
    "<a:ppParty:1411880372882640936>",
    "<a:retardJAM:1411880379081556018>",
    "<a:thatsCrazy:1411880503941791805>",
];

pub const FINAL_WEEK: &[&str] = &[
    "<a:BAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA:1081971147622596628>",
    "<a:HYPERNODDERS:1229852036288217118>",
    "<a:LETSGOOO:1081971175133024377>",
    "<a:NODDERS:1081963012405071953>",
    "<a:POGGIES:1229852070002294785>",
    "<a:WOO:1229857245756657805>",
    "<a:HYPERS:1081947121009295401>",
    "<a:WAAAAYTOODANK:1229857219730997330>",
    "<a:zyzzBass:1081980963627745460>",
    "<a:waga:1411843141224366232>",
    "<a:docSpin:1229866150347804774>",
    "<a:zyzzPls:1229857288320192542>",
    "<a:zyzzRave:1229861574152294550>",
    "<a:CatSpin:1229852879733391461>",
    "<a:Jigglin:1229852953356013568>",
    "<a:catBop:1411848568100098048>",
    "<a:CatTime:1229853027897442354>",
    "<a:catJam:1229853092766547998>",
    "<a:happie:1229852997002203317>",
    "<a:veryCat:1229852881465905212>",
    "<a:AnnyLebronJam:1411849529124196533>",
    "<a:BLUBBERS:1411849753708204203>",
    "<a:borpafast:1411849800168505507>",
    "<a:catRAVE:1411862766553399336>",
    "<a:Cheergi:1411864001402503198>",
    "<a:lebronJAM:1411862813357379776>",
    "<a:Dance:1411864399492415588>",
    "<a:Headbang:1411864607148216330>",
    "<a:EDM:1411864471949021184>",
    "<a:INSANECAT:1411864653587546226>",
    "<a:MUGA:1411864885142229143>",
    "<a:OOOOBANG:1411864122676744262>",
    "<a:SEXO:1411864455129595944>",
    "<a:ROACH:1411864726958248026>",
    "<a:cokebert:1411863951356067861>",
    "<a:forsenGriddy:1411864083841548350>",
    "<a:goosePls4x:1411878995716345867>",
    "<a:mwah:1411864629738733638>",
    "<a:vibePls:1411864435210977393>",
    "<a:zazabert:1411863893420150866>",
    "<a:BANGER:1411864800165888123>",
    "<a:AYOOO:1411877554771722342>",
    "<a:DEMONCAT:1411879385509789736>",
    "<a:ForsenSingingAtYou:1411879503982235679>",
    "<a:DemonTime:1411879388663779419>",
    "<a:Glerm:1411879509229174824>",
    "<a:HYPERYump:1411879742671687790>",
    "<a:Kissahomie:1411879860707659776>",
    "<a:danse:1411879380380024953>",
    "<a:clappi:1411879249165418607>",
    "<a:duckass:1411879397161570366>",
    "<a:dvaWalk4x:1411879494192464055>",
    "<a:glorpNotL:1411879514233114694>",
    "<a:lerolero:1411879867812675594>",
    "<a:PartyKirby:1411880282226819243>",
    "<a:RainbowPls:1411880375537631372>",
    "<a:Sussy4x:1411880500930285568>",
    "<a:VeiO:1411880518655676566>",
    "<a:veiNODDERS:1411880514104725644>",
    "<a:poggSpin:1411880370198024292>",
    "<a:WOW:1411880525836320779>",
    "<a:luh:1411880270533103636>",
    "<a:marinFlush:1411880272944824351>",
    "<a:ppParty:1411880372882640936>",
    "<a:retardJAM:1411880379081556018>",
    "<a:thatsCrazy:1411880503941791805>",
];
